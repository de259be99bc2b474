//! Palette (linear RGBA)

use glam::Vec4;

pub const YELLOW: Vec4 = Vec4::new(1.0, 0.835, 0.31, 1.0);
pub const YELLOW_VARIANT: Vec4 = Vec4::new(1.0, 0.91, 0.6, 1.0);
pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
/// Falling body
pub const BODY: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
/// Spline stroke
pub const PATH: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
