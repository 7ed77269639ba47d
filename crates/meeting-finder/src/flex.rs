//! Flex hours: bounded extensions of a working window.
//!
//! A participant who is outside their normal window at some hour may still be
//! able to attend by starting earlier or finishing later. The flex window
//! lists those hours in viewer-local time, nearest first, each with the
//! number of hours the participant would have to shift.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::participant::Participant;
use crate::timezone::{wrap_hour, TimeContext};

/// Default number of hours a participant may shift in either direction.
pub const DEFAULT_FLEX_RANGE: u8 = 2;

/// Which edge of the working window is being stretched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    /// Start before the normal start of day.
    Early,
    /// Stay past the normal end of day.
    Late,
}

impl fmt::Display for FlexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlexDirection::Early => "early",
            FlexDirection::Late => "late",
        })
    }
}

/// Outcome of checking one hour against a flex window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexCheck {
    pub can_flex: bool,
    pub direction: Option<FlexDirection>,
    pub hours_needed: u8,
}

impl FlexCheck {
    pub const NONE: FlexCheck = FlexCheck {
        can_flex: false,
        direction: None,
        hours_needed: 0,
    };

    fn flex(direction: FlexDirection, hours_needed: u8) -> Self {
        Self {
            can_flex: true,
            direction: Some(direction),
            hours_needed,
        }
    }
}

/// Viewer-local flex hours around a working window.
///
/// `early[i]` is `i + 1` hours before the converted start; `late[i]` is `i`
/// hours after the converted (exclusive) end. In both lists the cost of
/// position `i` is `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexWindow {
    pub early: Vec<u8>,
    pub late: Vec<u8>,
}

impl FlexWindow {
    /// Build the flex window around a viewer-local `[start, end)` window.
    pub fn around(start: u8, end: u8, range: u8) -> Self {
        let early = (1..=range)
            .map(|i| wrap_hour(i64::from(start) - i64::from(i)))
            .collect();
        let late = (0..range)
            .map(|i| wrap_hour(i64::from(end) + i64::from(i)))
            .collect();
        Self { early, late }
    }

    /// Check `hour` against the early list first, then the late list.
    ///
    /// When the lists collide (a workday of `24 - 2 * range` hours or more)
    /// the early match wins.
    pub fn check(&self, hour: u8) -> FlexCheck {
        if let Some(pos) = self.early.iter().position(|&h| h == hour) {
            return FlexCheck::flex(FlexDirection::Early, pos as u8 + 1);
        }
        if let Some(pos) = self.late.iter().position(|&h| h == hour) {
            return FlexCheck::flex(FlexDirection::Late, pos as u8 + 1);
        }
        FlexCheck::NONE
    }
}

/// Compute the participant's flex window in hours local to `viewer_tz`.
///
/// # Errors
/// Returns `FinderError::InvalidTimezone` if either zone is unknown.
pub fn compute_flex_window(
    participant: &Participant,
    viewer_tz: &str,
    range: u8,
    ctx: &TimeContext<'_>,
) -> Result<FlexWindow> {
    let (start, end) = ctx.viewer_window(participant, viewer_tz)?;
    Ok(FlexWindow::around(start, end, range))
}

/// Whether the participant could attend at viewer-local `hour` by flexing.
pub fn check_flex_availability(
    participant: &Participant,
    hour: u8,
    viewer_tz: &str,
    range: u8,
    ctx: &TimeContext<'_>,
) -> Result<FlexCheck> {
    Ok(compute_flex_window(participant, viewer_tz, range, ctx)?.check(hour))
}
