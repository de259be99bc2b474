//! Axis-aligned rectangles for body and container bounds
//!
//! Coordinates are window space: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left and bottom-right corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            top_left: Vec2::new(left, top),
            bottom_right: Vec2::new(right, bottom),
        }
    }

    /// Build from a position and a size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            top_left: origin,
            bottom_right: origin + size,
        }
    }

    /// Smallest rect covering every point (None for an empty slice)
    pub fn covering(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self {
            top_left: min,
            bottom_right: max,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(&self) -> Vec2 {
        (self.top_left + self.bottom_right) * 0.5
    }

    /// Same rect moved by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            top_left: self.top_left + offset,
            bottom_right: self.bottom_right + offset,
        }
    }

    /// True when `other` lies entirely inside `self` (shared edges count as inside)
    pub fn contains(&self, other: &Rect) -> bool {
        other.top_left.x >= self.top_left.x
            && other.top_left.y >= self.top_left.y
            && other.bottom_right.x <= self.bottom_right.x
            && other.bottom_right.y <= self.bottom_right.y
    }

    /// True when the interiors intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.top_left.x < other.bottom_right.x
            && other.top_left.x < self.bottom_right.x
            && self.top_left.y < other.bottom_right.y
            && other.top_left.y < self.bottom_right.y
    }
}

/// Collision between a body and its container.
///
/// A body collides once it is no longer fully contained by the container. The
/// predicate this replaces combined two per-axis ORs with an AND, which only fired
/// when the body sat entirely beyond the container on both axes and so never
/// stopped a body falling inside a larger parent.
pub fn have_collision(body: &Rect, container: &Rect) -> bool {
    !container.contains(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inner_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&Rect::new(10.0, 10.0, 90.0, 90.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&Rect::new(10.0, 10.0, 90.0, 101.0)));
        assert!(!outer.contains(&Rect::new(-1.0, 10.0, 90.0, 90.0)));
    }

    #[test]
    fn test_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        // Touching edges do not overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(50.0, 50.0, 60.0, 60.0)));
    }

    #[test]
    fn test_collision_when_body_leaves_container() {
        let container = Rect::new(0.0, 0.0, 400.0, 800.0);
        let body = Rect::new(100.0, 300.0, 300.0, 500.0);
        assert!(!have_collision(&body, &container));

        // Resting on the floor is still inside
        let on_floor = body.translate(Vec2::new(0.0, 300.0));
        assert!(!have_collision(&on_floor, &container));

        let through_floor = body.translate(Vec2::new(0.0, 301.0));
        assert!(have_collision(&through_floor, &container));
    }

    #[test]
    fn test_covering() {
        assert!(Rect::covering(&[]).is_none());
        let r = Rect::covering(&[Vec2::new(3.0, 1.0), Vec2::new(-2.0, 5.0)]).unwrap();
        assert_eq!(r, Rect::new(-2.0, 1.0, 3.0, 5.0));
        assert!((r.width() - 5.0).abs() < 1e-6);
        assert!((r.height() - 4.0).abs() < 1e-6);
    }
}
