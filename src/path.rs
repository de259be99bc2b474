//! Random point sets joined by cubic Bezier segments
//!
//! Points are sorted left to right and each pair is connected with a cubic whose
//! control points sit at the horizontal midpoint, giving a smooth step-like curve.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};
use crate::sim::Rect;

/// Generated points plus the ranges they were drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsData {
    pub points: Vec<Vec2>,
    pub x_range: RangeInclusive<i32>,
    pub y_range: RangeInclusive<i32>,
}

/// Draw `count` points with integer coordinates from the inclusive ranges
pub fn generate_points_data<R: Rng + ?Sized>(
    count: usize,
    x_range: RangeInclusive<i32>,
    y_range: RangeInclusive<i32>,
    rng: &mut R,
) -> Result<PointsData> {
    for range in [&x_range, &y_range] {
        if range.is_empty() {
            return Err(PhysicsError::EmptyRange {
                start: *range.start(),
                end: *range.end(),
            });
        }
    }

    let points = (0..count)
        .map(|_| {
            let x = rng.random_range(x_range.clone());
            let y = rng.random_range(y_range.clone());
            Vec2::new(x as f32, y as f32)
        })
        .collect();

    Ok(PointsData {
        points,
        x_range,
        y_range,
    })
}

/// A single path instruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Vec2),
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
}

/// Host-drawable path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) {
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
    }

    /// Number of cubic segments
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
            .count()
    }

    /// Sample every cubic into `segments_per_curve` line segments
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<Vec2> {
        let segments = segments_per_curve.max(1);
        let mut out = Vec::with_capacity(1 + self.curve_count() * segments);
        let mut pen = Vec2::ZERO;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    pen = p;
                    out.push(p);
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    for i in 1..=segments {
                        let t = i as f32 / segments as f32;
                        out.push(cubic_point(pen, c1, c2, to, t));
                    }
                    pen = to;
                }
            }
        }
        out
    }

    /// Bounds of the flattened path
    pub fn bounds(&self, segments_per_curve: usize) -> Option<Rect> {
        Rect::covering(&self.flatten(segments_per_curve))
    }
}

/// Point on a cubic Bezier at parameter `t`
pub fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

fn by_x_then_y(a: &Vec2, b: &Vec2) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Build a smooth path through the points, left to right
pub fn generate_path(points: &PointsData) -> Result<Path> {
    let mut sorted = points.points.clone();
    sorted.sort_by(by_x_then_y);

    let first = *sorted.first().ok_or(PhysicsError::EmptyPath)?;
    let mut path = Path::new();
    path.move_to(first);

    for (index, point) in sorted.iter().enumerate() {
        let prev = sorted[index.saturating_sub(1)];
        let mid_x = prev.x + (point.x - prev.x) / 2.0;
        path.cubic_to(Vec2::new(mid_x, prev.y), Vec2::new(mid_x, point.y), *point);
    }

    log::debug!("generated path with {} curves", path.curve_count());
    Ok(path)
}
