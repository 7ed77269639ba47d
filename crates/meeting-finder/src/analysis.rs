//! Per-hour classification of participants in the viewer's local day.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flex::{FlexDirection, FlexWindow};
use crate::participant::Participant;
use crate::timezone::{in_working_range, TimeContext, HOURS_PER_DAY};

/// A participant who can attend at an hour only by shifting their day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexMember {
    pub participant: Participant,
    pub direction: FlexDirection,
    pub hours_needed: u8,
}

/// Who can make one viewer-local hour, and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourAnalysis {
    pub hour: u8,
    pub available: Vec<Participant>,
    pub flexing: Vec<FlexMember>,
    pub unavailable: Vec<Participant>,
    /// `available.len() + flexing.len()`.
    pub reachable: usize,
}

impl HourAnalysis {
    pub fn is_available(&self, id: &str) -> bool {
        self.available.iter().any(|p| p.id == id)
    }

    pub fn flex_for(&self, id: &str) -> Option<&FlexMember> {
        self.flexing.iter().find(|m| m.participant.id == id)
    }
}

/// A participant's working window and flex window, both viewer-local.
///
/// Computed once per participant so the 24-hour sweep does no timezone work.
#[derive(Debug, Clone)]
struct ViewerSchedule<'p> {
    participant: &'p Participant,
    start: u8,
    end: u8,
    flex: Option<FlexWindow>,
}

fn viewer_schedules<'p>(
    participants: &'p [Participant],
    viewer_tz: &str,
    flex_range: Option<u8>,
    ctx: &TimeContext<'_>,
) -> Result<Vec<ViewerSchedule<'p>>> {
    participants
        .iter()
        .map(|participant| {
            let (start, end) = ctx.viewer_window(participant, viewer_tz)?;
            Ok(ViewerSchedule {
                participant,
                start,
                end,
                flex: flex_range.map(|range| FlexWindow::around(start, end, range)),
            })
        })
        .collect()
}

fn classify(hour: u8, schedules: &[ViewerSchedule<'_>]) -> HourAnalysis {
    let mut available = Vec::new();
    let mut flexing = Vec::new();
    let mut unavailable = Vec::new();

    for schedule in schedules {
        if in_working_range(hour, schedule.start, schedule.end) {
            available.push(schedule.participant.clone());
            continue;
        }
        let check = schedule.flex.as_ref().map(|w| w.check(hour));
        match check.and_then(|c| c.direction.map(|d| (d, c.hours_needed))) {
            Some((direction, hours_needed)) => flexing.push(FlexMember {
                participant: schedule.participant.clone(),
                direction,
                hours_needed,
            }),
            None => unavailable.push(schedule.participant.clone()),
        }
    }

    let reachable = available.len() + flexing.len();
    HourAnalysis {
        hour,
        available,
        flexing,
        unavailable,
        reachable,
    }
}

/// Classify every participant at one viewer-local hour.
///
/// `flex_range` of `None` disables flex hours. Input order is preserved
/// within each bucket.
///
/// # Errors
/// Returns `FinderError::InvalidTimezone` if any zone is unknown.
pub fn analyze_hour(
    hour: u8,
    participants: &[Participant],
    viewer_tz: &str,
    flex_range: Option<u8>,
    ctx: &TimeContext<'_>,
) -> Result<HourAnalysis> {
    let schedules = viewer_schedules(participants, viewer_tz, flex_range, ctx)?;
    Ok(classify(hour, &schedules))
}

/// Classify every participant at each viewer-local hour, 0 through 23.
pub fn analyze_day(
    participants: &[Participant],
    viewer_tz: &str,
    flex_range: Option<u8>,
    ctx: &TimeContext<'_>,
) -> Result<Vec<HourAnalysis>> {
    let schedules = viewer_schedules(participants, viewer_tz, flex_range, ctx)?;
    Ok((0..HOURS_PER_DAY)
        .map(|hour| classify(hour, &schedules))
        .collect())
}
