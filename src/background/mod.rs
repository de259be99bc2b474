//! Animated wave background
//!
//! `WAVE_SHADER` is handed to the host renderer as-is. `shade` evaluates the same
//! formula on the CPU for previews and tests; `gradient_fallback` covers hosts
//! without programmable shaders.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::consts::MS_PER_SEC;
use crate::theme::{WHITE, YELLOW, YELLOW_VARIANT};

/// WGSL fragment shader drawing the layered waves
pub const WAVE_SHADER: &str = include_str!("wave.wgsl");

const SPEED_MULTIPLIER: f32 = 1.5;
const LOOPS: u32 = 8;
const ENERGY: f32 = 0.6;
const HORIZONTAL_FACTOR: f32 = 4.3;

/// Uniform values for one frame of the background
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveUniforms {
    /// Surface size in pixels
    pub resolution: Vec2,
    /// Seconds since the animation started
    pub time: f32,
    /// Base color the waves lighten toward white
    pub color: Vec4,
}

impl WaveUniforms {
    pub fn new(resolution: Vec2, time: f32) -> Self {
        Self {
            resolution,
            time,
            color: YELLOW,
        }
    }
}

/// Turns frame timestamps into shader seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundClock {
    seconds: f32,
}

impl BackgroundClock {
    /// Record a frame timestamp (ms) and return the shader time
    pub fn on_frame(&mut self, frame_time_ms: u64) -> f32 {
        self.seconds = (frame_time_ms as f64 / MS_PER_SEC) as f32;
        self.seconds
    }

    pub fn seconds(&self) -> f32 {
        self.seconds
    }
}

/// GLSL-style step: 0 below the edge, 1 at or above it
#[inline]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge { 0.0 } else { 1.0 }
}

#[inline]
fn color_multiplier(y: f32, factor: f32) -> f32 {
    step(y, 1.0 + factor * 2.0) - step(y, factor - 0.1)
}

/// CPU evaluation of `WAVE_SHADER` at one pixel
pub fn shade(frag_coord: Vec2, uniforms: &WaveUniforms) -> Vec4 {
    let mut uv = frag_coord / uniforms.resolution;
    let mut color = uniforms.color.truncate();
    let time_offset = uniforms.time * SPEED_MULTIPLIER;
    let h_adjustment = uv.x * HORIZONTAL_FACTOR;
    let loop_color = (Vec3::ONE - color) / LOOPS as f32;

    for i in 1..=LOOPS {
        let loop_factor = i as f32 * 0.1;
        let curve = ((time_offset + h_adjustment) * ENERGY).sin() * (1.0 - loop_factor) * 0.05;
        color += loop_color * color_multiplier(uv.y, loop_factor);
        uv.y += curve;
    }

    color.extend(1.0)
}

/// Vertical gradient Yellow -> YellowVariant -> White
pub fn gradient_fallback(y: f32, height: f32) -> Vec4 {
    if height <= 0.0 {
        return YELLOW;
    }
    let t = (y / height).clamp(0.0, 1.0);
    if t < 0.5 {
        YELLOW.lerp(YELLOW_VARIANT, t * 2.0)
    } else {
        YELLOW_VARIANT.lerp(WHITE, (t - 0.5) * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_shader_source_has_entry_point() {
        assert!(WAVE_SHADER.contains("fn fs_main"));
        assert!(WAVE_SHADER.contains("var<uniform>"));
    }

    #[test]
    fn test_top_rows_keep_base_color() {
        let uniforms = WaveUniforms::new(Vec2::new(200.0, 100.0), 0.0);
        // No loop band reaches uv.y = 0 at x = 0, time = 0 (flat curve)
        let top = shade(Vec2::new(0.0, 0.0), &uniforms);
        assert!(close(top, YELLOW));
    }

    #[test]
    fn test_bottom_rows_reach_white() {
        let uniforms = WaveUniforms::new(Vec2::new(200.0, 100.0), 0.0);
        // uv.y = 1.0 lies inside every loop band
        let bottom = shade(Vec2::new(0.0, 100.0), &uniforms);
        assert!(close(bottom, WHITE));
        assert_eq!(bottom.w, 1.0);
    }

    #[test]
    fn test_time_moves_the_waves() {
        let a = WaveUniforms::new(Vec2::new(200.0, 100.0), 0.0);
        let b = WaveUniforms { time: 1.7, ..a };
        let changed = (0..100).any(|row| {
            let p = Vec2::new(120.0, row as f32);
            !close(shade(p, &a), shade(p, &b))
        });
        assert!(changed);
    }

    #[test]
    fn test_background_clock_seconds() {
        let mut clock = BackgroundClock::default();
        assert_eq!(clock.on_frame(2_500), 2.5);
        assert_eq!(clock.seconds(), 2.5);
    }

    #[test]
    fn test_gradient_endpoints() {
        assert!(close(gradient_fallback(0.0, 300.0), YELLOW));
        assert!(close(gradient_fallback(150.0, 300.0), YELLOW_VARIANT));
        assert!(close(gradient_fallback(300.0, 300.0), WHITE));
        assert!(close(gradient_fallback(10.0, 0.0), YELLOW));
    }
}
