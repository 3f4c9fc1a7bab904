//! Error types for curfew

use thiserror::Error;

/// Core error type for curfew operations
#[derive(Debug, Error)]
pub enum CurfewError {
    /// The session duration field did not parse as a positive whole
    /// number of minutes.
    #[error("invalid session duration: {input:?}")]
    InvalidDuration { input: String },
}

impl CurfewError {
    pub fn invalid_duration(input: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurfewError>;
