//! Threshold parsing and duration formatting

use regex::Regex;
use std::sync::LazyLock;

use super::ValidationError;

static THRESHOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*([smhdwSMHDW]?)\s*$").expect("threshold pattern is valid")
});

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Parse user input into seconds.
///
/// Accepts a whole number, optionally followed by a unit: `s`, `m`, `h`,
/// `d` or `w` (`90`, `45m`, `3d`). Anything else is a validation error.
pub fn parse_threshold(input: &str) -> Result<i64, ValidationError> {
    let invalid = || {
        ValidationError(format!(
            "Threshold '{}' is not a whole number of seconds (units s, m, h, d, w are allowed)",
            input.trim()
        ))
    };

    let caps = THRESHOLD_RE.captures(input).ok_or_else(invalid)?;
    let value: i64 = caps[1].parse().map_err(|_| invalid())?;
    let unit = match caps[2].to_ascii_lowercase().as_str() {
        "" | "s" => 1,
        "m" => MINUTE,
        "h" => HOUR,
        "d" => DAY,
        "w" => WEEK,
        _ => return Err(invalid()),
    };

    value.checked_mul(unit).ok_or_else(invalid)
}

/// Largest unit that divides the threshold exactly (`259200` -> `3d`).
pub fn format_threshold(seconds: i64) -> String {
    for (unit, suffix) in [(WEEK, "w"), (DAY, "d"), (HOUR, "h"), (MINUTE, "m")] {
        if seconds != 0 && seconds % unit == 0 {
            return format!("{}{}", seconds / unit, suffix);
        }
    }
    format!("{}s", seconds)
}

/// Two most significant units of an elapsed time (`3d 4h`, `12m 5s`, `42s`).
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0) as i64;
    let days = total / DAY;
    let hours = (total % DAY) / HOUR;
    let minutes = (total % HOUR) / MINUTE;
    let secs = total % MINUTE;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
