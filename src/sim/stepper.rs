//! Per-frame free-fall step
//!
//! Advances a `PhysicsState` once per display frame using closed-form kinematics
//! measured from the start anchor.

use glam::Vec2;

use super::geometry::have_collision;
use super::state::PhysicsState;
use crate::consts::{G, MS_PER_SEC};
use crate::error::{PhysicsError, Result};

/// Timing for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Timestamp the frame clock assigned to this frame (ms)
    pub frame_time_ms: u64,
    /// Wall-clock time the callback actually ran (ms)
    pub now_ms: u64,
}

impl Frame {
    pub fn at(now_ms: u64) -> Self {
        Self {
            frame_time_ms: now_ms,
            now_ms,
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Offset and velocity moved forward
    Advanced,
    /// Running flag is off; nothing changed
    Stopped,
    /// Body left its container; the body stays halted until reset
    Collided,
}

/// Velocity after `t` seconds of free fall from `v0`
#[inline]
pub fn velocity_at(v0: f64, g: f64, t: f64) -> f64 {
    v0 + g * t
}

/// Distance needed to reach velocity `v` from rest (v² = 2gs)
#[inline]
pub fn displacement_for(v: f64, g: f64) -> f64 {
    v * v / (2.0 * g)
}

/// Reject gravity the energy relation cannot divide by
pub fn check_gravity(g: f64) -> Result<()> {
    if g.is_finite() && g > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidSettings(format!(
            "gravity must be finite and positive, got {g}"
        )))
    }
}

/// Advance the body by one frame under standard gravity
pub fn tick(state: &mut PhysicsState, frame: Frame) -> Result<TickOutcome> {
    tick_with_gravity(state, frame, G)
}

/// Advance the body by one frame.
///
/// The collision check runs before the step, as the frame loop does, and again
/// after it so the frame that leaves the container reports `Collided`.
/// `g` must be finite and positive.
pub fn tick_with_gravity(state: &mut PhysicsState, frame: Frame, g: f64) -> Result<TickOutcome> {
    check_gravity(g)?;
    if !state.is_running() {
        return Ok(TickOutcome::Stopped);
    }
    if state.has_collided() {
        return Ok(TickOutcome::Collided);
    }

    let parent = state.parent_bounds().ok_or(PhysicsError::NotMeasured)?;
    let body = state.body_rect().ok_or(PhysicsError::NotMeasured)?;
    if have_collision(&body, &parent) {
        state.mark_collided();
        return Ok(TickOutcome::Collided);
    }

    let start_ms = state.ensure_anchored(frame.now_ms);
    state.record_frame_time(frame.now_ms.saturating_sub(frame.frame_time_ms));

    let t = frame.now_ms.saturating_sub(start_ms) as f64 / MS_PER_SEC;
    let v = velocity_at(state.v0(), g, t);
    let s = displacement_for(v, g);
    let offset = state.offset();
    let new_y = offset.y + s.round() as f32;
    log::trace!("tick t={t:.3}s v={v:.4} s={s:.4} y={new_y}");
    state.record_step(v, Vec2::new(offset.x, new_y), frame.now_ms);

    match state.body_rect() {
        Some(body) if have_collision(&body, &parent) => {
            state.mark_collided();
            Ok(TickOutcome::Collided)
        }
        _ => Ok(TickOutcome::Advanced),
    }
}
