//! Physics body state and change notification
//!
//! `PhysicsState` is the single owned record the stepper mutates once per frame.
//! Hosts read it directly or subscribe to `StateChange` notifications.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::error::{PhysicsError, Result};

/// Geometry delivered by the layout whenever the body is (re)positioned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Body position in window space
    pub position: Vec2,
    /// Body bounds in window space, without the simulation offset
    pub bounds: Rect,
    /// Parent bounds in window space (None for a root element)
    pub parent_bounds: Option<Rect>,
}

/// Observable change emitted by `PhysicsState`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange {
    Offset(Vec2),
    Velocity(f64),
    Running(bool),
    FrameTime(u64),
    Collided,
}

type Observer = Box<dyn FnMut(&StateChange)>;

/// Serializable view of a run, for logs and saved sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSnapshot {
    /// Velocity the current run started from
    pub v0: f64,
    pub offset: Vec2,
    /// Seconds since the start anchor (None if never started)
    pub elapsed: Option<f64>,
}

/// State of one falling body
pub struct PhysicsState {
    position: Vec2,
    bounds: Option<Rect>,
    parent_bounds: Option<Rect>,
    offset: Vec2,
    velocity: f64,
    /// Velocity at the start anchor
    v0: f64,
    start_ms: Option<u64>,
    last_update_ms: Option<u64>,
    running: bool,
    collided: bool,
    frame_time_ms: u64,
    /// Stored for bounce support; never applied
    restitution: f32,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for PhysicsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsState")
            .field("position", &self.position)
            .field("bounds", &self.bounds)
            .field("parent_bounds", &self.parent_bounds)
            .field("offset", &self.offset)
            .field("velocity", &self.velocity)
            .field("v0", &self.v0)
            .field("start_ms", &self.start_ms)
            .field("last_update_ms", &self.last_update_ms)
            .field("running", &self.running)
            .field("collided", &self.collided)
            .field("frame_time_ms", &self.frame_time_ms)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PhysicsState {
    /// Create an unmeasured body. A body created running anchors its clock on the
    /// first tick.
    pub fn new(running: bool) -> Self {
        Self {
            position: Vec2::splat(-1.0),
            bounds: None,
            parent_bounds: None,
            offset: Vec2::ZERO,
            velocity: 0.0,
            v0: 0.0,
            start_ms: None,
            last_update_ms: None,
            running,
            collided: false,
            frame_time_ms: 0,
            restitution: 1.0,
            observers: Vec::new(),
        }
    }

    /// Register an observer called on every state change
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&StateChange) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: StateChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    /// Apply layout geometry. A body without a parent cannot simulate.
    pub fn measure(&mut self, measurement: Measurement) -> Result<()> {
        self.position = measurement.position;
        self.bounds = Some(measurement.bounds);
        let parent = measurement.parent_bounds.ok_or(PhysicsError::MissingParent)?;
        self.parent_bounds = Some(parent);
        Ok(())
    }

    /// Start or stop the simulation.
    ///
    /// Starting anchors elapsed time at the last update (or `now_ms` for a fresh
    /// body) and keeps the stored velocity as `v0`, so a stop/start pair resumes
    /// instead of resetting.
    pub fn set_running(&mut self, running: bool, now_ms: u64) {
        if running && !self.running {
            self.anchor(now_ms);
        }
        if running != self.running {
            self.running = running;
            log::debug!("physics running: {running}");
            self.notify(StateChange::Running(running));
        }
    }

    pub fn toggle_running(&mut self, now_ms: u64) {
        self.set_running(!self.running, now_ms);
    }

    fn anchor(&mut self, now_ms: u64) {
        self.start_ms = Some(self.last_update_ms.unwrap_or(now_ms));
        self.v0 = self.velocity;
    }

    /// Anchor the clock if the body was created running and never ticked
    pub(super) fn ensure_anchored(&mut self, now_ms: u64) -> u64 {
        match self.start_ms {
            Some(start) => start,
            None => {
                self.anchor(now_ms);
                self.start_ms.unwrap_or(now_ms)
            }
        }
    }

    pub(super) fn record_step(&mut self, velocity: f64, offset: Vec2, now_ms: u64) {
        self.velocity = velocity;
        self.last_update_ms = Some(now_ms);
        self.notify(StateChange::Velocity(velocity));
        self.update_offset(offset);
    }

    pub(super) fn record_frame_time(&mut self, frame_time_ms: u64) {
        self.frame_time_ms = frame_time_ms;
        self.notify(StateChange::FrameTime(frame_time_ms));
    }

    pub(super) fn mark_collided(&mut self) {
        if !self.collided {
            self.collided = true;
            log::info!(
                "physics body collided at offset ({}, {}) velocity {:.3}",
                self.offset.x,
                self.offset.y,
                self.velocity
            );
            self.notify(StateChange::Collided);
        }
    }

    pub fn update_offset(&mut self, offset: Vec2) {
        if offset != self.offset {
            self.offset = offset;
            self.notify(StateChange::Offset(offset));
        }
    }

    /// Restart from rest at the measured position. Geometry and observers are kept.
    pub fn reset(&mut self) {
        self.update_offset(Vec2::ZERO);
        self.velocity = 0.0;
        self.v0 = 0.0;
        self.start_ms = None;
        self.last_update_ms = None;
        self.collided = false;
        self.frame_time_ms = 0;
        self.notify(StateChange::Velocity(0.0));
    }

    /// Body bounds moved by the simulation offset
    pub fn body_rect(&self) -> Option<Rect> {
        self.bounds.map(|b| b.translate(self.offset))
    }

    pub fn snapshot(&self, now_ms: u64) -> PhysicsSnapshot {
        PhysicsSnapshot {
            v0: self.v0,
            offset: self.offset,
            elapsed: self
                .start_ms
                .map(|start| now_ms.saturating_sub(start) as f64 / crate::consts::MS_PER_SEC),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn parent_bounds(&self) -> Option<Rect> {
        self.parent_bounds
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn v0(&self) -> f64 {
        self.v0
    }

    pub fn start_ms(&self) -> Option<u64> {
        self.start_ms
    }

    pub fn last_update_ms(&self) -> Option<u64> {
        self.last_update_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    pub fn frame_time_ms(&self) -> u64 {
        self.frame_time_ms
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }
}
