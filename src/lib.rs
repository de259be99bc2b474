//! Freefall Playground - frame-driven animation techniques without a UI toolkit
//!
//! Core modules:
//! - `sim`: Free-fall stepper (state, tick, frame clock, driver)
//! - `path`: Random points joined by cubic Bezier segments
//! - `anim`: Tweens, infinite repeats and springs sampled per frame
//! - `background`: Layered wave shader and its CPU/gradient fallbacks
//! - `settings`: JSON-backed run configuration
//! - `theme`: Palette shared by the background and the runner

pub mod anim;
pub mod background;
pub mod error;
pub mod path;
pub mod settings;
pub mod sim;
pub mod theme;

pub use error::{PhysicsError, Result};
pub use settings::Settings;

/// Simulation constants
pub mod consts {
    /// Standard gravity (m/s²), applied to offsets in pixels
    pub const G: f64 = 9.80665;
    /// Default frame rate of the native runner
    pub const DEFAULT_FRAME_RATE_HZ: u32 = 60;
    /// Safety cap on frames for a single headless run
    pub const DEFAULT_MAX_FRAMES: u32 = 10_000;
    /// Milliseconds per second
    pub const MS_PER_SEC: f64 = 1000.0;
}
