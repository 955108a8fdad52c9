use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Distance from `timestamp` to `now` in words, such as "3 hours ago".
/// Months are 30 days and years 365.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }
    if seconds < MINUTE {
        return "just now".to_string();
    }

    let (count, unit) = match seconds {
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < 30 * DAY => (s / DAY, "day"),
        s if s < 365 * DAY => (s / (30 * DAY), "month"),
        s => (s / (365 * DAY), "year"),
    };
    format!("{} ago", plural(count, unit))
}

/// Relative time for the last 30 days, a date after that
pub fn posted_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if now.signed_duration_since(timestamp).num_days() > 30 {
        return timestamp.format("%Y-%m-%d %H:%M").to_string();
    }
    time_ago(timestamp, now)
}

/// "1 reply", "3 replies", "2 days", "0 upvotes"
pub fn plural(count: impl Into<i64>, noun: &str) -> String {
    let count = count.into();
    if count == 1 {
        return format!("1 {}", noun);
    }
    // Only a consonant before the final y takes "-ies"
    let consonant_y = noun
        .strip_suffix('y')
        .filter(|stem| stem.chars().last().is_some_and(|c| !"aeiou".contains(c)));
    match consonant_y {
        Some(stem) => format!("{} {}ies", count, stem),
        None => format!("{} {}s", count, noun),
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
