//! # meeting-finder
//!
//! Find the best common meeting times for people spread across timezones.
//!
//! Each participant has a home IANA timezone and a daily working window,
//! possibly wrapping past midnight. The finder looks at every hour of the
//! viewer's local day, works out who is available, who could make it by
//! shifting their day a little ("flex hours"), scores every contiguous
//! window and returns a short, deduplicated, ranked list.
//!
//! The computation is pure and deterministic for a fixed [`TimeContext`]:
//! UTC offsets are looked up at the context's reference instant through an
//! injectable [`OffsetLookup`].
//!
//! ## Modules
//!
//! - [`timezone`] - hour conversion between zones, working-window membership
//! - [`flex`] - early/late flex windows
//! - [`analysis`] - per-hour classification of participants
//! - [`slots`] - contiguous window search and scoring
//! - [`ranking`] - subset deduplication and ranking
//! - [`finder`] - options, result and the top-level search
//! - [`display`] - 12-hour clock labels
//! - [`error`] - Error types

pub mod analysis;
pub mod display;
pub mod error;
pub mod finder;
pub mod flex;
pub mod participant;
pub mod ranking;
pub mod slots;
pub mod timezone;

pub use analysis::{analyze_day, analyze_hour, FlexMember, HourAnalysis};
pub use error::FinderError;
pub use finder::{find_meeting_times, find_meeting_times_now, MeetingFinderOptions, MeetingFinderResult};
pub use flex::{check_flex_availability, compute_flex_window, FlexCheck, FlexDirection, FlexWindow};
pub use participant::Participant;
pub use ranking::rank_slots;
pub use slots::{find_contiguous_slots, score_slot, MeetingSlot, SlotQuality};
pub use timezone::{in_working_range, IanaOffsets, OffsetLookup, TimeContext};
