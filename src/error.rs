//! Error types for the workout session.
//!
//! None of these are fatal: the session posts a notice, keeps its state, and
//! hands the error back to the caller for reporting only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error("inputs have to be positive numbers")]
    InvalidInput,

    #[error("form submitted without a map click")]
    NoPendingClick,

    #[error("map is not initialized")]
    MapNotReady,
}

/// Why the geolocation provider could not produce a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
