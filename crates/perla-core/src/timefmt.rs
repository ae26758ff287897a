//! Relative time formatting for invitation listings.

use time::OffsetDateTime;

/// Format the distance between `then` and now as a coarse human string
/// ("12 seconds", "3 minutes", "1 hour", "2 days").
pub fn format_distance_to_now(then: OffsetDateTime) -> String {
    format_distance(then, OffsetDateTime::now_utc())
}

/// Format the distance between two instants.
///
/// A `then` in the future clamps to zero seconds.
pub fn format_distance(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let seconds = (now - then).whole_seconds().max(0);

    if seconds < 60 {
        return format!("{} seconds", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    plural(hours / 24, "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
