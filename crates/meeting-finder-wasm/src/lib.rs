//! WASM bindings for meeting-finder.
//!
//! Exposes the meeting search, the per-hour analysis and the "working right
//! now" check to JavaScript via `wasm-bindgen`. All complex types are passed
//! as JSON strings using the same camelCase shapes the UI already stores.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meeting-finder-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/meeting_finder_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use meeting_finder::analysis::analyze_day;
use meeting_finder::{find_meeting_times, MeetingFinderOptions, Participant, TimeContext};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parsing and serialization shared by the exports
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-02-17T14:00:00+00:00")
/// and naive local time (e.g., "2026-02-17T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

/// The reference instant for offset lookups; the current time when omitted.
fn reference_or_now(reference: Option<&str>) -> Result<DateTime<Utc>, String> {
    reference.map_or_else(|| Ok(Utc::now()), parse_datetime)
}

fn parse_options(json: &str) -> Result<MeetingFinderOptions, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid options JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn find_json(options_json: &str, reference: Option<&str>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    let ctx = TimeContext::iana(reference_or_now(reference)?);
    let result = find_meeting_times(&options, &ctx).map_err(|e| e.to_string())?;
    to_json(&result)
}

fn analyze_json(options_json: &str, reference: Option<&str>) -> Result<String, String> {
    let options = parse_options(options_json)?;
    options.validate().map_err(|e| e.to_string())?;
    let ctx = TimeContext::iana(reference_or_now(reference)?);
    let day = analyze_day(
        &options.participants,
        &options.viewer_timezone,
        options.effective_flex_range(),
        &ctx,
    )
    .map_err(|e| e.to_string())?;
    to_json(&day)
}

fn working_at(participant_json: &str, instant: &str) -> Result<bool, String> {
    let participant: Participant = serde_json::from_str(participant_json)
        .map_err(|e| format!("Invalid participant JSON: {}", e))?;
    participant.validate().map_err(|e| e.to_string())?;
    let at = parse_datetime(instant)?;
    TimeContext::iana(at)
        .is_working_at(&participant, at)
        .map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find and rank meeting slots.
///
/// `options_json` is a `MeetingFinderOptions` object (`participants`,
/// `viewerTimezone`, optional `minDuration`, `maxDuration`, `allowFlexHours`,
/// `flexRange`). `reference` is the ISO 8601 instant UTC offsets are
/// evaluated at; omit it to use the current time. Returns the
/// `MeetingFinderResult` as a JSON string.
#[wasm_bindgen(js_name = "findMeetingTimes")]
pub fn find_meeting_times_js(options_json: &str, reference: Option<String>) -> Result<String, JsValue> {
    find_json(options_json, reference.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Classify every participant at each hour of the viewer's day.
///
/// Takes the same options object as [`find_meeting_times_js`] and returns a
/// JSON array of 24 hour analyses.
#[wasm_bindgen(js_name = "analyzeHours")]
pub fn analyze_hours_js(options_json: &str, reference: Option<String>) -> Result<String, JsValue> {
    analyze_json(options_json, reference.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Whether a participant is inside their working window at `instant`.
#[wasm_bindgen(js_name = "isWorkingAt")]
pub fn is_working_at_js(participant_json: &str, instant: &str) -> Result<bool, JsValue> {
    working_at(participant_json, instant).map_err(|e| JsValue::from_str(&e))
}
