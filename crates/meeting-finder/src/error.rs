//! Error types for meeting-finder operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinderError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid working hours for '{participant}': {start}-{end} (hours must be 0-23)")]
    InvalidWorkingHours {
        participant: String,
        start: u8,
        end: u8,
    },

    #[error("Invalid duration range: min {min}, max {max} (expected 1 <= min <= max <= 24)")]
    InvalidDuration { min: u8, max: u8 },
}

pub type Result<T> = std::result::Result<T, FinderError>;
