//! Hour-of-day arithmetic across IANA timezones.
//!
//! Everything here works at hour granularity. Offsets are looked up at an
//! explicit reference instant carried by [`TimeContext`] rather than at an
//! implicit "now", so a pinned reference gives deterministic results even
//! for zones that observe DST.
//!
//! Fractional offsets (UTC+5:30, UTC+5:45, ...) are rounded to the nearest
//! whole hour during conversion. This is a known imprecision: every hour
//! bucket downstream assumes whole-hour alignment.

use std::fmt;

use chrono::{DateTime, Duration, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{FinderError, Result};
use crate::participant::Participant;

pub const HOURS_PER_DAY: u8 = 24;

/// Source of UTC offsets for named timezones.
///
/// Implementations return the offset in (possibly fractional) hours that
/// `timezone` has at the instant `at`.
pub trait OffsetLookup: Send + Sync {
    fn offset_hours(&self, timezone: &str, at: DateTime<Utc>) -> Result<f64>;
}

/// Offset lookup backed by the IANA database bundled with `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaOffsets;

impl OffsetLookup for IanaOffsets {
    fn offset_hours(&self, timezone: &str, at: DateTime<Utc>) -> Result<f64> {
        let tz = parse_timezone(timezone)?;
        let seconds = tz
            .offset_from_utc_datetime(&at.naive_utc())
            .fix()
            .local_minus_utc();
        Ok(f64::from(seconds) / 3600.0)
    }
}

static IANA: IanaOffsets = IanaOffsets;

/// Offset lookup plus the reference instant all offsets are evaluated at.
#[derive(Clone, Copy)]
pub struct TimeContext<'a> {
    offsets: &'a dyn OffsetLookup,
    reference: DateTime<Utc>,
}

impl fmt::Debug for TimeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeContext")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl<'a> TimeContext<'a> {
    pub fn new(offsets: &'a dyn OffsetLookup, reference: DateTime<Utc>) -> Self {
        Self { offsets, reference }
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// UTC offset of `timezone` at the reference instant, in hours.
    pub fn offset_hours(&self, timezone: &str) -> Result<f64> {
        self.offsets.offset_hours(timezone, self.reference)
    }

    /// Convert an hour of day in `from_tz` to the same instant's hour in `to_tz`.
    ///
    /// The offset difference is added to `hour`, the sum is rounded to the
    /// nearest whole hour (halves round up) and wrapped into `0..24`.
    ///
    /// # Errors
    /// Returns `FinderError::InvalidTimezone` if either zone is unknown to
    /// the offset lookup.
    pub fn convert_hour(&self, hour: u8, from_tz: &str, to_tz: &str) -> Result<u8> {
        let diff = self.offset_hours(to_tz)? - self.offset_hours(from_tz)?;
        Ok(wrap_hour(round_half_up(f64::from(hour) + diff)))
    }

    /// The participant's working window, converted to hours local to `viewer_tz`.
    pub fn viewer_window(&self, participant: &Participant, viewer_tz: &str) -> Result<(u8, u8)> {
        let start = self.convert_hour(participant.working_hours_start, &participant.timezone, viewer_tz)?;
        let end = self.convert_hour(participant.working_hours_end, &participant.timezone, viewer_tz)?;
        Ok((start, end))
    }

    /// Whether `viewer_hour` (local to `viewer_tz`) is inside the participant's window.
    pub fn is_available_at_hour(
        &self,
        participant: &Participant,
        viewer_hour: u8,
        viewer_tz: &str,
    ) -> Result<bool> {
        let (start, end) = self.viewer_window(participant, viewer_tz)?;
        Ok(in_working_range(viewer_hour, start, end))
    }

    /// Local hour of day of `instant` in `timezone`.
    ///
    /// Uses the offset in effect at the reference instant, not at `instant`.
    pub fn local_hour(&self, timezone: &str, instant: DateTime<Utc>) -> Result<u8> {
        let offset_seconds = (self.offset_hours(timezone)? * 3600.0).round() as i64;
        let local = instant + Duration::seconds(offset_seconds);
        Ok(local.hour() as u8)
    }

    /// Whether the absolute `instant` falls inside the participant's own working window.
    pub fn is_working_at(&self, participant: &Participant, instant: DateTime<Utc>) -> Result<bool> {
        let hour = self.local_hour(&participant.timezone, instant)?;
        Ok(in_working_range(
            hour,
            participant.working_hours_start,
            participant.working_hours_end,
        ))
    }
}

impl TimeContext<'static> {
    /// Context using the bundled IANA database at a pinned reference instant.
    pub fn iana(reference: DateTime<Utc>) -> Self {
        Self::new(&IANA, reference)
    }

    /// Context using the bundled IANA database at the current instant.
    pub fn now() -> Self {
        Self::iana(Utc::now())
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| FinderError::InvalidTimezone(name.to_string()))
}

/// Half-open `[start, end)` membership, wrapping past midnight when `start > end`.
///
/// `start == end` takes the non-wrapping branch and so contains no hours.
pub fn in_working_range(hour: u8, start: u8, end: u8) -> bool {
    if start <= end {
        start <= hour && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// Wrap any whole hour (negative included) into `0..24`.
pub fn wrap_hour(hour: i64) -> u8 {
    hour.rem_euclid(i64::from(HOURS_PER_DAY)) as u8
}

// f64::round sends -5.5 to -6; hour buckets expect -5.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
