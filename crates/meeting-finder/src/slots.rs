//! Contiguous slot search and scoring.
//!
//! Every start hour is paired with every allowed duration. A participant
//! attends a window only if they can make every hour of it, either in their
//! normal window or by flexing. Windows reachable by fewer than
//! [`MIN_ATTENDEES`] people are dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::analysis::{FlexMember, HourAnalysis};
use crate::display;
use crate::error::Result;
use crate::flex::FlexDirection;
use crate::participant::Participant;
use crate::timezone::{wrap_hour, TimeContext, HOURS_PER_DAY};

/// Fewest attendees (normal + flexing) for a window to count as a slot.
pub const MIN_ATTENDEES: usize = 2;

const NORMAL_WEIGHT: f64 = 60.0;
const FLEX_WEIGHT: f64 = 30.0;
const EVERYONE_BONUS: f64 = 10.0;
const HEAVY_FLEX_PENALTY: f64 = 3.0;
const HEAVY_FLEX_HOURS: u8 = 2;

/// Coarse label for a slot score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SlotQuality {
    /// `>= 90` excellent, `>= 70` good, `>= 50` fair, otherwise poor.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            SlotQuality::Excellent
        } else if score >= 70.0 {
            SlotQuality::Good
        } else if score >= 50.0 {
            SlotQuality::Fair
        } else {
            SlotQuality::Poor
        }
    }
}

impl fmt::Display for SlotQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SlotQuality::Excellent => "excellent",
            SlotQuality::Good => "good",
            SlotQuality::Fair => "fair",
            SlotQuality::Poor => "poor",
        })
    }
}

/// A candidate meeting window in the viewer's local day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSlot {
    /// `"{start}-{end}-{duration}"`, unique per window.
    pub id: String,
    pub start_hour: u8,
    /// Exclusive; `(start_hour + duration) % 24`.
    pub end_hour: u8,
    pub duration: u8,
    pub score: f64,
    pub quality: SlotQuality,
    pub available_members: Vec<Participant>,
    pub flexing_members: Vec<FlexMember>,
    pub unavailable_members: Vec<Participant>,
}

impl MeetingSlot {
    /// The viewer-local hours the slot covers, in order.
    pub fn hours(&self) -> Vec<u8> {
        slot_hours(self.start_hour, self.duration)
    }

    pub fn attendee_count(&self) -> usize {
        self.available_members.len() + self.flexing_members.len()
    }

    /// Human-readable range, e.g. `"9 AM - 5 PM"`.
    pub fn label(&self) -> String {
        display::format_hour_range(self.start_hour, self.end_hour)
    }

    /// The slot's start and end hours in the participant's own timezone.
    pub fn local_hours_for(
        &self,
        participant: &Participant,
        viewer_tz: &str,
        ctx: &TimeContext<'_>,
    ) -> Result<(u8, u8)> {
        let start = ctx.convert_hour(self.start_hour, viewer_tz, &participant.timezone)?;
        let end = ctx.convert_hour(self.end_hour, viewer_tz, &participant.timezone)?;
        Ok((start, end))
    }
}

/// The wrapped sequence of hours a window starting at `start` covers.
pub fn slot_hours(start: u8, duration: u8) -> Vec<u8> {
    (0..duration)
        .map(|i| wrap_hour(i64::from(start) + i64::from(i)))
        .collect()
}

/// Score a window from its attendance.
///
/// `available/total * 60 + flexing/total * 30`, plus 10 when everyone can
/// attend, minus 3 per flexing member who needs two or more hours. Clamped
/// to `0..=100`.
pub fn score_slot(available: usize, flexing: &[FlexMember], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;
    let normal = available as f64 / total_f * NORMAL_WEIGHT;
    let flex = flexing.len() as f64 / total_f * FLEX_WEIGHT;
    let bonus = if available + flexing.len() == total {
        EVERYONE_BONUS
    } else {
        0.0
    };
    let heavy = flexing
        .iter()
        .filter(|m| m.hours_needed >= HEAVY_FLEX_HOURS)
        .count();
    let penalty = heavy as f64 * HEAVY_FLEX_PENALTY;

    (normal + flex + bonus - penalty).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Presence {
    Available,
    Flex(FlexDirection, u8),
    Away,
}

/// Each participant's presence at one hour, by input position.
///
/// The buckets of an [`HourAnalysis`] keep input order, so walking
/// `participants` once while advancing a cursor per bucket pairs every entry
/// with the participant it came from, even when ids repeat.
fn presence_column(analysis: &HourAnalysis, participants: &[Participant]) -> Vec<Presence> {
    let mut available = analysis.available.iter().peekable();
    let mut flexing = analysis.flexing.iter().peekable();

    participants
        .iter()
        .map(|participant| {
            if available.next_if(|p| *p == participant).is_some() {
                Presence::Available
            } else if let Some(m) = flexing.next_if(|m| m.participant == *participant) {
                Presence::Flex(m.direction, m.hours_needed)
            } else {
                Presence::Away
            }
        })
        .collect()
}

/// `presence[p][h]` for participant index `p` and viewer hour `h`.
fn presence_grid(analyses: &[HourAnalysis], participants: &[Participant]) -> Vec<Vec<Presence>> {
    let mut grid = vec![vec![Presence::Away; HOURS_PER_DAY as usize]; participants.len()];
    for analysis in analyses.iter().filter(|a| a.hour < HOURS_PER_DAY) {
        let column = presence_column(analysis, participants);
        for (row, presence) in grid.iter_mut().zip(column) {
            row[analysis.hour as usize] = presence;
        }
    }
    grid
}

enum Attendance {
    Full,
    // Worst flex requirement across the window.
    Flexing(FlexDirection, u8),
    Absent,
}

fn attendance(row: &[Presence], hours: &[u8]) -> Attendance {
    let mut worst: Option<(FlexDirection, u8)> = None;
    for &hour in hours {
        match row[hour as usize] {
            Presence::Available => {}
            Presence::Flex(direction, needed) => {
                if worst.is_none_or(|(_, w)| needed > w) {
                    worst = Some((direction, needed));
                }
            }
            Presence::Away => return Attendance::Absent,
        }
    }
    match worst {
        Some((direction, needed)) => Attendance::Flexing(direction, needed),
        None => Attendance::Full,
    }
}

/// Enumerate every start hour and duration in `min_duration..=max_duration`
/// and keep the windows at least [`MIN_ATTENDEES`] people can attend.
///
/// `analyses` should come from [`crate::analysis::analyze_day`]; an hour with
/// no analysis counts as nobody being available.
pub fn find_contiguous_slots(
    analyses: &[HourAnalysis],
    participants: &[Participant],
    min_duration: u8,
    max_duration: u8,
) -> Vec<MeetingSlot> {
    let grid = presence_grid(analyses, participants);
    let total = participants.len();
    let mut slots = Vec::new();

    for start in 0..HOURS_PER_DAY {
        for duration in min_duration..=max_duration {
            let hours = slot_hours(start, duration);
            let mut available_members = Vec::new();
            let mut flexing_members = Vec::new();
            let mut unavailable_members = Vec::new();

            for (participant, row) in participants.iter().zip(&grid) {
                match attendance(row, &hours) {
                    Attendance::Full => available_members.push(participant.clone()),
                    Attendance::Flexing(direction, hours_needed) => flexing_members.push(FlexMember {
                        participant: participant.clone(),
                        direction,
                        hours_needed,
                    }),
                    Attendance::Absent => unavailable_members.push(participant.clone()),
                }
            }

            if available_members.len() + flexing_members.len() < MIN_ATTENDEES {
                continue;
            }

            let score = score_slot(available_members.len(), &flexing_members, total);
            let end = wrap_hour(i64::from(start) + i64::from(duration));
            trace!(start, duration, score, "candidate slot");
            slots.push(MeetingSlot {
                id: format!("{start}-{end}-{duration}"),
                start_hour: start,
                end_hour: end,
                duration,
                score,
                quality: SlotQuality::from_score(score),
                available_members,
                flexing_members,
                unavailable_members,
            });
        }
    }

    slots
}
