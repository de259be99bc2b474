//! Run settings
//!
//! Loaded from a JSON file; every field falls back to its default when absent.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FRAME_RATE_HZ, DEFAULT_MAX_FRAMES, G};
use crate::error::{PhysicsError, Result};
use crate::sim::{Measurement, Rect};

/// Settings for a headless playground run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    /// Gravitational acceleration
    pub gravity: f64,
    /// Start the body falling immediately
    pub start_running: bool,

    // === Frames ===
    pub frame_rate_hz: u32,
    /// Give up after this many frames without a collision
    pub max_frames: u32,

    // === Geometry ===
    /// Container size in pixels (top-left at the origin)
    pub container_size: Vec2,
    /// Body edge length in pixels, centered in the container
    pub body_size: f32,
    /// Measure the body as a root element (no parent)
    pub detached: bool,

    // === Path ===
    pub path_points: usize,
    /// Fraction of the width skipped on the left when drawing points
    pub path_left_margin: f32,
    /// Seed for point generation
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: G,
            start_running: true,

            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            max_frames: DEFAULT_MAX_FRAMES,

            container_size: Vec2::new(1080.0, 2200.0),
            body_size: 200.0,
            detached: false,

            path_points: 15,
            path_left_margin: 0.1,
            seed: 12345,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(PhysicsError::InvalidSettings(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if self.frame_rate_hz == 0 {
            return Err(PhysicsError::InvalidSettings("frame_rate_hz must be > 0".into()));
        }
        if !(self.body_size.is_finite() && self.container_size.is_finite()) {
            return Err(PhysicsError::InvalidSettings(format!(
                "body_size {} and container_size {:?} must be finite",
                self.body_size, self.container_size
            )));
        }
        if self.body_size <= 0.0
            || self.body_size > self.container_size.x
            || self.body_size > self.container_size.y
        {
            return Err(PhysicsError::InvalidSettings(format!(
                "body_size {} must be positive and fit the container {:?}",
                self.body_size, self.container_size
            )));
        }
        if !(0.0..1.0).contains(&self.path_left_margin) {
            return Err(PhysicsError::InvalidSettings(
                "path_left_margin must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }

    pub fn container(&self) -> Rect {
        Rect::from_origin_size(Vec2::ZERO, self.container_size)
    }

    /// Layout measurement for a body centered in the container
    pub fn measurement(&self) -> Measurement {
        let container = self.container();
        let size = Vec2::splat(self.body_size);
        let origin = container.center() - size * 0.5;
        Measurement {
            position: origin,
            bounds: Rect::from_origin_size(origin, size),
            parent_bounds: (!self.detached).then_some(container),
        }
    }

    /// Point ranges: the lower half of the container, minus the left margin
    pub fn path_ranges(&self) -> (std::ops::RangeInclusive<i32>, std::ops::RangeInclusive<i32>) {
        let width = self.container_size.x.round() as i32;
        let height = self.container_size.y.round() as i32;
        let left = (width as f32 * self.path_left_margin) as i32;
        (left..=width, height / 2..=height)
    }
}
