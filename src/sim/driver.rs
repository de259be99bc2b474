//! Frame loop: runs the stepper against a frame clock until the body halts

use super::clock::FrameClock;
use super::state::PhysicsState;
use super::stepper::{TickOutcome, check_gravity, tick_with_gravity};
use crate::consts::G;
use crate::error::Result;

/// Outcome of a driven run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames that moved the body, including the one that left the container
    pub frames: u32,
    pub outcome: TickOutcome,
    pub final_offset_y: f32,
    pub final_velocity: f64,
    /// Mean callback latency over the run (ms)
    pub mean_frame_time_ms: f64,
}

/// Owns a body and the clock that drives it
pub struct Simulation<C: FrameClock> {
    pub state: PhysicsState,
    clock: C,
    gravity: f64,
    max_frames: u32,
}

impl<C: FrameClock> Simulation<C> {
    pub fn new(state: PhysicsState, clock: C) -> Self {
        Self {
            state,
            clock,
            gravity: G,
            max_frames: crate::consts::DEFAULT_MAX_FRAMES,
        }
    }

    /// Override gravity; it must be finite and positive
    pub fn with_gravity(mut self, gravity: f64) -> Result<Self> {
        check_gravity(gravity)?;
        self.gravity = gravity;
        Ok(self)
    }

    pub fn with_max_frames(mut self, max_frames: u32) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Start the body at the clock's current time
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.state.set_running(true, now);
    }

    pub fn stop(&mut self) {
        let now = self.clock.now_ms();
        self.state.set_running(false, now);
    }

    /// Wait for one frame and tick once
    pub fn step(&mut self) -> Result<TickOutcome> {
        let frame = self.clock.next_frame();
        tick_with_gravity(&mut self.state, frame, self.gravity)
    }

    /// Tick until the body collides, stops, or the frame cap is hit
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut frames = 0;
        let mut latency_total = 0u64;
        let mut outcome = TickOutcome::Stopped;

        while frames < self.max_frames {
            let updated_before = self.state.last_update_ms();
            outcome = self.step()?;
            // A collision found after the step still moved the body this frame
            if self.state.last_update_ms() != updated_before {
                frames += 1;
                latency_total += self.state.frame_time_ms();
            }
            if outcome != TickOutcome::Advanced {
                break;
            }
            if frames % 60 == 0 {
                log::debug!(
                    "frame {frames}: y={} v={:.3}",
                    self.state.offset().y,
                    self.state.velocity()
                );
            }
        }

        if outcome == TickOutcome::Advanced && frames == self.max_frames {
            log::warn!("run stopped at frame cap {}", self.max_frames);
        }

        Ok(RunSummary {
            frames,
            outcome,
            final_offset_y: self.state.offset().y,
            final_velocity: self.state.velocity(),
            mean_frame_time_ms: if frames > 0 {
                latency_total as f64 / frames as f64
            } else {
                0.0
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;
    use crate::sim::clock::ManualClock;
    use crate::sim::geometry::Rect;
    use crate::sim::state::Measurement;
    use glam::Vec2;

    fn simulation(container_bottom: f32) -> Simulation<ManualClock> {
        let mut state = PhysicsState::new(false);
        state
            .measure(Measurement {
                position: Vec2::new(50.0, 0.0),
                bounds: Rect::new(50.0, 0.0, 150.0, 100.0),
                parent_bounds: Some(Rect::new(0.0, 0.0, 200.0, container_bottom)),
            })
            .unwrap();
        Simulation::new(state, ManualClock::new(10_000, 16).with_latency(3))
    }

    #[test]
    fn test_run_until_collision() {
        let mut sim = simulation(600.0);
        sim.start();
        let summary = sim.run().unwrap();

        assert_eq!(summary.outcome, TickOutcome::Collided);
        assert!(summary.frames > 0);
        // The colliding frame moved the body and is counted
        assert_eq!(
            sim.state.last_update_ms(),
            Some(10_000 + 16 * summary.frames as u64 + 3)
        );
        assert!(summary.final_offset_y > 500.0);
        assert!((summary.mean_frame_time_ms - 3.0).abs() < 1e-9);
        assert!(sim.state.has_collided());
    }

    #[test]
    fn test_run_without_start_is_stopped() {
        let mut sim = simulation(600.0);
        let summary = sim.run().unwrap();
        assert_eq!(summary.outcome, TickOutcome::Stopped);
        assert_eq!(summary.frames, 0);
    }

    #[test]
    fn test_frame_cap() {
        let mut sim = simulation(1.0e9).with_max_frames(10);
        sim.start();
        let summary = sim.run().unwrap();
        assert_eq!(summary.frames, 10);
        assert_eq!(summary.outcome, TickOutcome::Advanced);
    }

    #[test]
    fn test_collision_before_any_step_counts_no_frames() {
        let mut sim = simulation(50.0);
        sim.start();
        let summary = sim.run().unwrap();
        assert_eq!(summary.outcome, TickOutcome::Collided);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.mean_frame_time_ms, 0.0);
    }

    #[test]
    fn test_zero_gravity_rejected() {
        let err = simulation(600.0).with_gravity(0.0).err();
        assert!(matches!(err, Some(PhysicsError::InvalidSettings(_))));
    }

    #[test]
    fn test_stronger_gravity_falls_faster() {
        let mut earth = simulation(1.0e9).with_max_frames(30);
        let mut heavy = simulation(1.0e9)
            .with_max_frames(30)
            .with_gravity(3.0 * G)
            .unwrap();
        earth.start();
        heavy.start();
        let a = earth.run().unwrap();
        let b = heavy.run().unwrap();
        assert!(b.final_velocity > a.final_velocity);
        assert!(b.final_offset_y >= a.final_offset_y);
    }
}
