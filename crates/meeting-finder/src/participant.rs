//! The person record the finder consumes.

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};
use crate::timezone::{parse_timezone, HOURS_PER_DAY};

/// A meeting participant with a home timezone and a daily working window.
///
/// `working_hours_start` and `working_hours_end` are hours of the day (0-23)
/// local to `timezone`. The window is half-open, `[start, end)`. When
/// `start > end` it wraps past midnight (e.g. 22 -> 6 for a night shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Stable identifier supplied by the caller.
    pub id: String,
    /// IANA timezone name (e.g. "America/New_York").
    pub timezone: String,
    pub working_hours_start: u8,
    pub working_hours_end: u8,
}

impl Participant {
    pub fn new(id: &str, timezone: &str, working_hours_start: u8, working_hours_end: u8) -> Self {
        Self {
            id: id.to_string(),
            timezone: timezone.to_string(),
            working_hours_start,
            working_hours_end,
        }
    }

    /// Check the timezone name and hour bounds.
    ///
    /// # Errors
    /// Returns `FinderError::InvalidTimezone` for an unknown IANA name and
    /// `FinderError::InvalidWorkingHours` if either bound is outside 0-23.
    pub fn validate(&self) -> Result<()> {
        parse_timezone(&self.timezone)?;
        if self.working_hours_start >= HOURS_PER_DAY || self.working_hours_end >= HOURS_PER_DAY {
            return Err(FinderError::InvalidWorkingHours {
                participant: self.id.clone(),
                start: self.working_hours_start,
                end: self.working_hours_end,
            });
        }
        Ok(())
    }

    /// Whether the window wraps past midnight.
    pub fn is_overnight(&self) -> bool {
        self.working_hours_start > self.working_hours_end
    }
}
