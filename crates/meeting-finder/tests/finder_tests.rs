//! End-to-end tests for the meeting finder.

use chrono::{DateTime, TimeZone, Utc};
use meeting_finder::finder::{
    NO_SLOTS_WITHOUT_FLEX_SUGGESTION, NO_SLOTS_WITH_FLEX_SUGGESTION, SELECT_MORE_SUGGESTION,
};
use meeting_finder::{
    find_meeting_times, FinderError, FlexDirection, MeetingFinderOptions, MeetingFinderResult,
    Participant, SlotQuality, TimeContext,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn run(options: &MeetingFinderOptions) -> MeetingFinderResult {
    find_meeting_times(options, &TimeContext::iana(reference())).unwrap()
}

fn slot_ids(result: &MeetingFinderResult) -> Vec<&str> {
    result.slots.iter().map(|s| s.id.as_str()).collect()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn identical_schedules_collapse_to_one_full_day_slot() {
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("ana", "UTC", 9, 17),
            Participant::new("ben", "UTC", 9, 17),
        ],
        "UTC",
    )
    .with_flex(false)
    .with_durations(1, 8);

    let result = run(&options);

    assert!(result.has_results);
    assert_eq!(slot_ids(&result), ["9-17-8"]);
    let slot = &result.slots[0];
    assert_eq!((slot.start_hour, slot.end_hour, slot.duration), (9, 17, 8));
    // 60 for everyone normally available + 10 everyone bonus.
    assert_eq!(slot.score, 70.0);
    assert_eq!(slot.quality, SlotQuality::Good);
    assert_eq!(slot.available_members.len(), 2);
    assert!(result.suggestion.is_none());
}

#[test]
fn disjoint_days_without_flex_suggest_enabling_it() {
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("london", "UTC", 9, 17),
            Participant::new("auckland", "Etc/GMT-12", 9, 17),
        ],
        "UTC",
    )
    .with_flex(false);

    let result = run(&options);

    assert!(!result.has_results);
    assert!(result.slots.is_empty());
    assert_eq!(result.suggestion.as_deref(), Some(NO_SLOTS_WITHOUT_FLEX_SUGGESTION));
    assert!(NO_SLOTS_WITHOUT_FLEX_SUGGESTION.contains("enabling flex hours"));
}

#[test]
fn twelve_hour_gap_is_out_of_reach_for_two_hour_flex() {
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("london", "UTC", 9, 17),
            Participant::new("auckland", "Etc/GMT-12", 9, 17),
        ],
        "UTC",
    )
    .with_flex_range(2);

    let result = run(&options);
    assert!(!result.has_results);
    assert_eq!(result.suggestion.as_deref(), Some(NO_SLOTS_WITH_FLEX_SUGGESTION));
}

#[test]
fn flex_bridges_a_ten_hour_gap() {
    // London 09-17 and UTC+10 09-17 (23-07 UTC) can only meet at 07-09 UTC,
    // with both sides flexing.
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("london", "UTC", 9, 17),
            Participant::new("brisbane", "Etc/GMT-10", 9, 17),
        ],
        "UTC",
    )
    .with_flex_range(2);

    let result = run(&options);

    assert!(result.has_results);
    assert_eq!(slot_ids(&result), ["7-8-1", "8-9-1", "7-9-2"]);
    for slot in &result.slots {
        assert!(!slot.flexing_members.is_empty());
        assert!(slot.flexing_members.iter().all(|m| m.hours_needed <= 2));
        assert!(matches!(slot.quality, SlotQuality::Good | SlotQuality::Fair | SlotQuality::Poor));
    }

    let first = &result.slots[0];
    // 30 flex + 10 everyone - 3 for London's two-hour early start.
    assert_eq!(first.score, 37.0);
    let london = first
        .flexing_members
        .iter()
        .find(|m| m.participant.id == "london")
        .unwrap();
    assert_eq!(london.direction, FlexDirection::Early);
    assert_eq!(london.hours_needed, 2);

    // Over 07-09 each side's worst hour costs two.
    let two_hour = &result.slots[2];
    assert!(two_hour.flexing_members.iter().all(|m| m.hours_needed == 2));
    assert_eq!(two_hour.score, 34.0);
}

#[test]
fn single_participant_asks_for_more_regardless_of_options() {
    let options = MeetingFinderOptions::new(vec![Participant::new("solo", "Not/AZone", 9, 17)], "Nowhere")
        .with_durations(0, 0)
        .with_flex(false);

    let result = run(&options);

    assert!(!result.has_results);
    assert_eq!(result.suggestion.as_deref(), Some(SELECT_MORE_SUGGESTION));
}

#[test]
fn no_participants_asks_for_more() {
    let result = run(&MeetingFinderOptions::new(vec![], "UTC"));
    assert_eq!(result.suggestion.as_deref(), Some(SELECT_MORE_SUGGESTION));
}

#[test]
fn full_attendance_window_outranks_partial_ones() {
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("ana", "UTC", 9, 17),
            Participant::new("ben", "UTC", 9, 17),
            Participant::new("cy", "UTC", 13, 17),
        ],
        "UTC",
    )
    .with_flex(false);

    let result = run(&options);

    assert_eq!(
        slot_ids(&result),
        ["13-17-4", "9-13-4", "10-14-4", "11-15-4", "12-16-4"]
    );
    assert_eq!(result.slots[0].score, 70.0);
    assert_eq!(result.slots[0].available_members.len(), 3);
    assert!(result.slots[1..].iter().all(|s| s.score == 40.0));

    let partial = &result.slots[4];
    assert_eq!(partial.unavailable_members.len(), 1);
    assert_eq!(partial.unavailable_members[0].id, "cy");
}

#[test]
fn overnight_overlap_wraps_midnight() {
    // UTC 22-06 and UTC+8 06-14 (22-06 UTC) share eight hours across midnight.
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("nox", "UTC", 22, 6),
            Participant::new("mei", "Etc/GMT-8", 6, 14),
        ],
        "UTC",
    )
    .with_flex(false);

    let result = run(&options);

    assert_eq!(
        slot_ids(&result),
        ["0-4-4", "1-5-4", "2-6-4", "22-2-4", "23-3-4"]
    );
    assert_eq!(result.slots[3].hours(), vec![22, 23, 0, 1]);
}

#[test]
fn results_are_capped_at_five() {
    let people = (0..4)
        .map(|i| Participant::new(&format!("p{i}"), "UTC", 0, 20))
        .collect();
    let result = run(&MeetingFinderOptions::new(people, "UTC").with_flex(false));
    assert_eq!(result.slots.len(), 5);
}

#[test]
fn participants_sharing_an_id_keep_their_own_schedules() {
    let evening = Participant::new("a", "UTC", 20, 22);
    let options = MeetingFinderOptions::new(
        vec![
            Participant::new("a", "UTC", 9, 17),
            evening.clone(),
            Participant::new("b", "UTC", 9, 17),
        ],
        "UTC",
    )
    .with_flex(false);

    let result = run(&options);

    let slot = &result.slots[0];
    assert_eq!(slot.id, "9-13-4");
    let available: Vec<(&str, u8)> = slot
        .available_members
        .iter()
        .map(|p| (p.id.as_str(), p.working_hours_start))
        .collect();
    assert_eq!(available, [("a", 9), ("b", 9)]);
    assert_eq!(slot.unavailable_members, [evening]);
    // 2/3 normally available, no everyone bonus.
    assert_eq!(slot.score, 40.0);
    assert_eq!(slot.quality, SlotQuality::Poor);
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn unknown_viewer_zone_is_rejected() {
    let options = MeetingFinderOptions::new(
        vec![Participant::new("a", "UTC", 9, 17), Participant::new("b", "UTC", 9, 17)],
        "Atlantis/Central",
    );
    let err = find_meeting_times(&options, &TimeContext::iana(reference())).unwrap_err();
    assert_eq!(err, FinderError::InvalidTimezone("Atlantis/Central".to_string()));
}

#[test]
fn inverted_duration_range_is_rejected() {
    let options = MeetingFinderOptions::new(
        vec![Participant::new("a", "UTC", 9, 17), Participant::new("b", "UTC", 9, 17)],
        "UTC",
    )
    .with_durations(4, 2);
    let err = find_meeting_times(&options, &TimeContext::iana(reference())).unwrap_err();
    assert_eq!(err, FinderError::InvalidDuration { min: 4, max: 2 });
}

#[test]
fn out_of_range_hour_is_rejected() {
    let options = MeetingFinderOptions::new(
        vec![Participant::new("a", "UTC", 9, 17), Participant::new("b", "UTC", 9, 30)],
        "UTC",
    );
    let err = find_meeting_times(&options, &TimeContext::iana(reference())).unwrap_err();
    assert!(matches!(err, FinderError::InvalidWorkingHours { ref participant, .. } if participant == "b"));
}

// ── Presentation ────────────────────────────────────────────────────────────

#[test]
fn slot_hours_in_each_participants_zone() {
    let ctx = TimeContext::iana(reference());
    let tokyo = Participant::new("aiko", "Asia/Tokyo", 9, 17);
    let options = MeetingFinderOptions::new(
        vec![Participant::new("ana", "UTC", 9, 17), Participant::new("ben", "UTC", 9, 17)],
        "UTC",
    )
    .with_flex(false)
    .with_durations(8, 8);

    let result = find_meeting_times(&options, &ctx).unwrap();
    let slot = &result.slots[0];
    assert_eq!(slot.local_hours_for(&tokyo, "UTC", &ctx).unwrap(), (18, 2));
    assert_eq!(slot.label(), "9 AM - 5 PM");
}

#[test]
fn result_serializes_in_camel_case() {
    let options = MeetingFinderOptions::new(
        vec![Participant::new("ana", "UTC", 9, 17), Participant::new("ben", "UTC", 8, 16)],
        "UTC",
    );
    let json = serde_json::to_value(run(&options)).unwrap();

    assert_eq!(json["hasResults"], true);
    assert!(json.get("suggestion").is_none());
    let slot = &json["slots"][0];
    assert!(slot.get("availableMembers").is_some());
    assert!(slot.get("flexingMembers").is_some());
    assert!(slot.get("unavailableMembers").is_some());
    assert_eq!(slot["availableMembers"][0]["workingHoursStart"], 9);
}

#[test]
fn options_fill_defaults_from_json() {
    let json = r#"{
        "participants": [
            {"id": "ana", "timezone": "UTC", "workingHoursStart": 9, "workingHoursEnd": 17}
        ],
        "viewerTimezone": "Europe/Berlin"
    }"#;
    let options: MeetingFinderOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.min_duration, 1);
    assert_eq!(options.max_duration, 4);
    assert!(options.allow_flex_hours);
    assert_eq!(options.flex_range, 2);
}
