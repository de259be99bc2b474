//! Error type shared by the simulation, path builder and settings loader

use thiserror::Error;

/// Everything that can go wrong in the playground
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A physics body was measured without a parent to fall within
    #[error("physics body has no parent container")]
    MissingParent,
    /// Tick requested before the layout delivered any geometry
    #[error("physics body has not been measured yet")]
    NotMeasured,
    /// Path requested from an empty point set
    #[error("cannot build a path from zero points")]
    EmptyPath,
    /// Point range with start > end
    #[error("empty range {start}..={end}")]
    EmptyRange { start: i32, end: i32 },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
