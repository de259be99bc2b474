//! Free-fall simulation
//!
//! All stepping logic lives here:
//! - Closed-form kinematics from a start anchor, evaluated once per frame
//! - Collision against the parent container halts the body
//! - Clocks are injected so runs can be deterministic

pub mod clock;
pub mod driver;
pub mod geometry;
pub mod state;
pub mod stepper;

pub use clock::{FrameClock, ManualClock, SystemClock};
pub use driver::{RunSummary, Simulation};
pub use geometry::{Rect, have_collision};
pub use state::{Measurement, PhysicsSnapshot, PhysicsState, StateChange};
pub use stepper::{
    Frame, TickOutcome, check_gravity, displacement_for, tick, tick_with_gravity, velocity_at,
};
