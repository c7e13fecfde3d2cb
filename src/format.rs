//! Display formatting utilities shared by all widgets.
//!
//! Pure functions only; rendering decisions (colors, layout) live in `ui`.

use {
    crate::api::TransactionType,
    chrono::{DateTime, NaiveDateTime, Utc},
};

/// Abbreviate a numeric magnitude for display.
///
/// Values >= 1M render as "x.xxM", values >= 1K as "x.xK", everything
/// else as a thousands-separated integer.
pub fn format_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        group_thousands(n)
    }
}

fn group_thousands(n: f64) -> String {
    // casts outside the i64 range saturate to i64::MIN/MAX; unsigned_abs
    // keeps the magnitude without overflowing on i64::MIN
    let rounded = n.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Parse a backend timestamp.
///
/// The backend emits ISO datetimes, sometimes without a timezone offset;
/// naive values are assumed to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

/// Bucket elapsed time since `timestamp` into a human string.
///
/// Each unit truncates (floor), matching how the feed ages entries.
/// Unparseable timestamps render "N/A" rather than failing the row.
pub fn format_relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(timestamp) else {
        return "N/A".to_string();
    };

    let elapsed = (now - then).num_seconds().max(0);
    let minutes = elapsed / 60;
    let hours = elapsed / 3_600;
    let days = elapsed / 86_400;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 7 {
        ago(days, "day")
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Symbol for a transaction type. Total over the enum; anything the
/// backend sends that we don't recognize falls back to the money symbol.
pub fn icon_for(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Daily => "📅",
        TransactionType::Weekly => "📆",
        TransactionType::Monthly => "🗓️",
        TransactionType::Work => "💼",
        TransactionType::Game => "🎮",
        TransactionType::Bank => "🏦",
        TransactionType::Business => "🏢",
        TransactionType::Social => "🤝",
        TransactionType::Tournament => "🏆",
        TransactionType::LevelUp => "⭐",
        TransactionType::Crime => "🔫",
        TransactionType::Pvp => "⚔️",
        TransactionType::Unknown => "💰",
    }
}

/// Shortened display name for a user id (first 8 characters).
pub fn short_user_id(user_id: &str) -> String {
    let prefix: String = user_id.chars().take(8).collect();
    format!("User {}...", prefix)
}
