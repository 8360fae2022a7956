//! Human-readable durations.

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Largest unit first.
const UNITS: [(i64, &str); 6] = [
    (YEAR, "y"),
    (MONTH, "mo"),
    (WEEK, "w"),
    (DAY, "d"),
    (HOUR, "h"),
    (MINUTE, "m"),
];

fn tenths_of(seconds: i64, unit: i64) -> i64 {
    (seconds as f64 / unit as f64 * 10.0).round() as i64
}

/// Format a duration in seconds using the largest fitting unit.
///
/// Below a minute the value is shown as whole seconds (`"45s"`). Larger
/// values use one decimal place with a trailing `.0` dropped (`"2.5m"`,
/// `"2m"`). Negative durations display as `"0s"`.
pub fn format_time(seconds: i64) -> String {
    if seconds < MINUTE {
        return format!("{}s", seconds.max(0));
    }

    let mut index = UNITS
        .iter()
        .position(|(unit, _)| seconds >= *unit)
        .unwrap_or(UNITS.len() - 1);
    let mut tenths = tenths_of(seconds, UNITS[index].0);

    // 3599s rounds to 60.0m, which reads as the next unit
    while index > 0 && tenths * UNITS[index].0 >= UNITS[index - 1].0 * 10 {
        index -= 1;
        tenths = tenths_of(seconds, UNITS[index].0);
    }

    let suffix = UNITS[index].1;
    if tenths % 10 == 0 {
        format!("{}{}", tenths / 10, suffix)
    } else {
        format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
    }
}
