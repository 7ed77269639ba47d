//! Top-level meeting finder: options in, ranked short-list out.
//!
//! ```text
//! participants < 2 ──────────────────────────────► no results ("select at least 2")
//! otherwise: validate → analyze 24 hours → search windows → rank
//!            ranked list empty ─────────────────► no results (flex-aware suggestion)
//!            otherwise ─────────────────────────► results
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::analyze_day;
use crate::error::{FinderError, Result};
use crate::flex::DEFAULT_FLEX_RANGE;
use crate::participant::Participant;
use crate::ranking::{rank_slots, MAX_RESULTS};
use crate::slots::{find_contiguous_slots, MeetingSlot};
use crate::timezone::{parse_timezone, TimeContext, HOURS_PER_DAY};

/// Fewest participants worth searching for.
pub const MIN_PARTICIPANTS: usize = 2;
pub const DEFAULT_MIN_DURATION: u8 = 1;
pub const DEFAULT_MAX_DURATION: u8 = 4;

pub const SELECT_MORE_SUGGESTION: &str = "Select at least 2 participants to find meeting times.";
pub const NO_SLOTS_WITH_FLEX_SUGGESTION: &str =
    "No common times found, even with flex hours. Try fewer participants or a shorter meeting.";
pub const NO_SLOTS_WITHOUT_FLEX_SUGGESTION: &str =
    "No overlapping working hours found. Try enabling flex hours to widen the search.";

fn default_min_duration() -> u8 {
    DEFAULT_MIN_DURATION
}

fn default_max_duration() -> u8 {
    DEFAULT_MAX_DURATION
}

fn default_allow_flex() -> bool {
    true
}

fn default_flex_range() -> u8 {
    DEFAULT_FLEX_RANGE
}

/// Everything the finder needs for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingFinderOptions {
    pub participants: Vec<Participant>,
    /// IANA zone the result hours are expressed in.
    #[serde(default)]
    pub viewer_timezone: String,
    #[serde(default = "default_min_duration")]
    pub min_duration: u8,
    #[serde(default = "default_max_duration")]
    pub max_duration: u8,
    #[serde(default = "default_allow_flex")]
    pub allow_flex_hours: bool,
    #[serde(default = "default_flex_range")]
    pub flex_range: u8,
}

impl MeetingFinderOptions {
    pub fn new(participants: Vec<Participant>, viewer_timezone: &str) -> Self {
        Self {
            participants,
            viewer_timezone: viewer_timezone.to_string(),
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            allow_flex_hours: true,
            flex_range: DEFAULT_FLEX_RANGE,
        }
    }

    pub fn with_durations(mut self, min: u8, max: u8) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    pub fn with_flex(mut self, allow: bool) -> Self {
        self.allow_flex_hours = allow;
        self
    }

    pub fn with_flex_range(mut self, range: u8) -> Self {
        self.flex_range = range;
        self
    }

    /// The flex range to search with, or `None` when flex hours are off.
    pub fn effective_flex_range(&self) -> Option<u8> {
        self.allow_flex_hours.then_some(self.flex_range)
    }

    /// Check the viewer zone, the duration bounds and every participant.
    pub fn validate(&self) -> Result<()> {
        parse_timezone(&self.viewer_timezone)?;
        if self.min_duration == 0
            || self.min_duration > self.max_duration
            || self.max_duration > HOURS_PER_DAY
        {
            return Err(FinderError::InvalidDuration {
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        self.participants.iter().try_for_each(Participant::validate)
    }
}

/// Outcome of one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingFinderResult {
    pub has_results: bool,
    /// At most [`MAX_RESULTS`], best first.
    pub slots: Vec<MeetingSlot>,
    /// Set only when `has_results` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl MeetingFinderResult {
    fn none(suggestion: &str) -> Self {
        Self {
            has_results: false,
            slots: Vec::new(),
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Find and rank meeting slots, with offsets evaluated at `ctx`'s reference instant.
///
/// Fewer than two participants is a normal outcome, not an error, and is
/// reported before any other option is looked at.
///
/// # Errors
/// Returns `FinderError::InvalidTimezone` for an unknown viewer or participant
/// zone, `FinderError::InvalidWorkingHours` for hours outside 0-23 and
/// `FinderError::InvalidDuration` unless `1 <= min <= max <= 24`.
pub fn find_meeting_times(
    options: &MeetingFinderOptions,
    ctx: &TimeContext<'_>,
) -> Result<MeetingFinderResult> {
    if options.participants.len() < MIN_PARTICIPANTS {
        debug!(
            participants = options.participants.len(),
            "not enough participants to search"
        );
        return Ok(MeetingFinderResult::none(SELECT_MORE_SUGGESTION));
    }
    options.validate()?;

    let flex_range = options.effective_flex_range();
    let analyses = analyze_day(
        &options.participants,
        &options.viewer_timezone,
        flex_range,
        ctx,
    )?;
    let candidates = find_contiguous_slots(
        &analyses,
        &options.participants,
        options.min_duration,
        options.max_duration,
    );
    let candidate_count = candidates.len();
    let slots = rank_slots(candidates, MAX_RESULTS);
    debug!(
        participants = options.participants.len(),
        viewer_timezone = %options.viewer_timezone,
        candidates = candidate_count,
        kept = slots.len(),
        "meeting search finished"
    );

    if slots.is_empty() {
        let suggestion = if options.allow_flex_hours {
            NO_SLOTS_WITH_FLEX_SUGGESTION
        } else {
            NO_SLOTS_WITHOUT_FLEX_SUGGESTION
        };
        return Ok(MeetingFinderResult::none(suggestion));
    }

    Ok(MeetingFinderResult {
        has_results: true,
        slots,
        suggestion: None,
    })
}

/// [`find_meeting_times`] against the bundled IANA database at the current instant.
pub fn find_meeting_times_now(options: &MeetingFinderOptions) -> Result<MeetingFinderResult> {
    find_meeting_times(options, &TimeContext::now())
}
