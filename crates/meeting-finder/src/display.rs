//! 12-hour clock labels for hours and slots.

/// `0 -> "12 AM"`, `9 -> "9 AM"`, `12 -> "12 PM"`, `17 -> "5 PM"`.
pub fn format_hour(hour: u8) -> String {
    let hour = hour % 24;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{twelve} {suffix}")
}

/// `"9 AM - 5 PM"`.
pub fn format_hour_range(start: u8, end: u8) -> String {
    format!("{} - {}", format_hour(start), format_hour(end))
}
