//! Display strings for sizes, durations and timestamps. These are computed
//! once at resolution time and stored alongside the raw values.
use time::macros::format_description;
use time::OffsetDateTime;

const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// Formats a byte count with two decimals and the largest unit that brings
/// the value under 1024. Beyond TB the number just keeps growing.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2}{}", value, SIZE_UNITS[unit])
}

/// Formats elapsed seconds compactly as hours, minutes and seconds, eliding
/// units above the leading one: `1h2m5s`, `10m5s`, `45s`.
pub fn human_duration(secs: i64) -> String {
    let (sign, secs) = if secs < 0 {
        ("-", secs.unsigned_abs())
    } else {
        ("", secs as u64)
    };
    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

/// Formats an epoch timestamp as a short RFC 822 style date in UTC, e.g.
/// `10 Nov 09 23:00 UTC`. An epoch outside the representable range formats
/// as the empty string.
pub fn human_date(epoch: i64) -> String {
    let format = format_description!(
        "[day] [month repr:short] [year repr:last_two] [hour]:[minute] UTC"
    );
    OffsetDateTime::from_unix_timestamp(epoch)
        .ok()
        .and_then(|date| date.format(&format).ok())
        .unwrap_or_default()
}
