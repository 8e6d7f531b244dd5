//! Core error types for glance-core.
//!
//! The snapshot path itself is total and never returns an error; these types
//! cover the boundaries around it (goal validation, wire encoding).

use thiserror::Error;

/// Core error type for glance-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A goal record failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Goal validation errors.
///
/// A goal that fails validation is skipped for the snapshot being generated;
/// it never aborts generation for the rest of the set.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Goal has no display name
    #[error("Goal {id} has an empty name")]
    EmptyName { id: String },

    /// Percent progress outside [0, 100]
    #[error("Goal {id} has percent_complete {value}, expected [0, 100]")]
    PercentOutOfRange { id: String, value: f64 },

    /// A numeric progress field is NaN or infinite
    #[error("Goal {id} has a non-finite value in field '{field}'")]
    NonFiniteValue { id: String, field: &'static str },

    /// Current streak exceeds the recorded longest streak
    #[error("Goal {id} has current_streak {current} > longest_streak {longest}")]
    StreakInvariant {
        id: String,
        current: u32,
        longest: u32,
    },
}
