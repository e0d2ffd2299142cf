//! Relative timestamps ("3 minutes ago").

use chrono::{DateTime, Utc};

/// Format `then` relative to `now`.
///
/// Buckets match the usual `fromNow` thresholds: 44 seconds, 89 seconds,
/// 44 minutes, 89 minutes, 21 hours, 35 hours, 25 days, 45 days, 10 months,
/// 17 months. Future timestamps clamp to "a few seconds ago".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0) as f64;

    if secs <= 44.0 {
        return "a few seconds ago".to_string();
    }
    if secs <= 89.0 {
        return "a minute ago".to_string();
    }

    let minutes = (secs / 60.0).round() as i64;
    if minutes <= 44 {
        return format!("{minutes} minutes ago");
    }
    if minutes <= 89 {
        return "an hour ago".to_string();
    }

    let hours = (secs / 3_600.0).round() as i64;
    if hours <= 21 {
        return format!("{hours} hours ago");
    }
    if hours <= 35 {
        return "a day ago".to_string();
    }

    let days = (secs / 86_400.0).round() as i64;
    if days <= 25 {
        return format!("{days} days ago");
    }
    if days <= 45 {
        return "a month ago".to_string();
    }

    let months = (days as f64 / 30.4375).round() as i64;
    if months <= 10 {
        return format!("{months} months ago");
    }
    if months <= 17 {
        return "a year ago".to_string();
    }

    let years = ((months as f64 / 12.0).round() as i64).max(2);
    format!("{years} years ago")
}
