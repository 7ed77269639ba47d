//! Deduplicate and rank candidate slots.
//!
//! A shorter window whose hours all sit inside a better-ranked longer window
//! adds nothing to the short-list, so it is dropped. Windows of equal
//! duration are never treated as duplicates of each other, even when their
//! hours overlap.

use std::cmp::Ordering;

use crate::slots::MeetingSlot;

/// Most slots a finder result carries.
pub const MAX_RESULTS: usize = 5;

/// Bitmask of the wrapped hours `start..start + duration`.
pub fn hour_mask(start: u8, duration: u8) -> u32 {
    (0..u32::from(duration)).fold(0u32, |mask, i| mask | 1 << ((u32::from(start) + i) % 24))
}

/// Whether `candidate` is a strict-duration subset of `kept`.
///
/// Only applies when `candidate` is strictly shorter than `kept`.
pub fn is_hour_subset(candidate: &MeetingSlot, kept: &MeetingSlot) -> bool {
    if candidate.duration >= kept.duration {
        return false;
    }
    let c = hour_mask(candidate.start_hour, candidate.duration);
    let k = hour_mask(kept.start_hour, kept.duration);
    c & !k == 0
}

/// Score descending, then longer first, then earlier start.
fn rank_order(a: &MeetingSlot, b: &MeetingSlot) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.duration.cmp(&a.duration))
        .then_with(|| a.start_hour.cmp(&b.start_hour))
}

/// Sort, drop covered shorter windows, and keep the top `max_results`.
pub fn rank_slots(mut slots: Vec<MeetingSlot>, max_results: usize) -> Vec<MeetingSlot> {
    slots.sort_by(rank_order);

    let mut kept: Vec<MeetingSlot> = Vec::new();
    for slot in slots {
        if kept.iter().any(|k| is_hour_subset(&slot, k)) {
            continue;
        }
        kept.push(slot);
    }

    kept.truncate(max_results);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SlotQuality;

    fn slot(start: u8, duration: u8, score: f64) -> MeetingSlot {
        let end = (start + duration) % 24;
        MeetingSlot {
            id: format!("{start}-{end}-{duration}"),
            start_hour: start,
            end_hour: end,
            duration,
            score,
            quality: SlotQuality::from_score(score),
            available_members: vec![],
            flexing_members: vec![],
            unavailable_members: vec![],
        }
    }

    #[test]
    fn mask_wraps_midnight() {
        assert_eq!(hour_mask(23, 2), 1 << 23 | 1);
    }

    #[test]
    fn equal_duration_never_subset() {
        assert!(!is_hour_subset(&slot(9, 2, 50.0), &slot(9, 2, 60.0)));
    }

    #[test]
    fn shorter_inside_longer_is_subset() {
        assert!(is_hour_subset(&slot(10, 1, 50.0), &slot(9, 3, 60.0)));
        assert!(is_hour_subset(&slot(0, 1, 50.0), &slot(23, 2, 60.0)));
        assert!(!is_hour_subset(&slot(12, 1, 50.0), &slot(9, 3, 60.0)));
    }

    #[test]
    fn higher_scoring_short_slot_survives_lower_long_one() {
        let ranked = rank_slots(vec![slot(9, 3, 40.0), slot(10, 1, 70.0)], MAX_RESULTS);
        let ids: Vec<_> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["10-11-1", "9-12-3"]);
    }

    #[test]
    fn truncates_to_max() {
        let slots = (0..10).map(|h| slot(h * 2, 1, 50.0)).collect();
        assert_eq!(rank_slots(slots, 3).len(), 3);
    }
}
