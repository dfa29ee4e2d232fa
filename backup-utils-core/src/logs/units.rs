use chrono::NaiveDateTime;

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Scale by powers of 1024 until the value sits in `[1, 1024)` (or the
/// largest unit is reached) and print with two decimals.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = bytes;
    let mut unit = 0;

    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", BYTE_UNITS[unit])
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// "3 hours ago" / "2 days from now".
pub fn relative_time(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = now.signed_duration_since(timestamp).num_seconds();
    let (seconds, suffix) = if delta < 0 {
        (-delta, "from now")
    } else {
        (delta, "ago")
    };

    let (n, unit) = match seconds {
        s if s < 60 => (s.max(1), "second"),
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 7 * 86_400 => (s / 86_400, "day"),
        s if s < 30 * 86_400 => (s / (7 * 86_400), "week"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };

    let plural = if n == 1 { "" } else { "s" };
    format!("{n} {unit}{plural} {suffix}")
}

/// Cut to `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
