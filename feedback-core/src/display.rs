//! Derived display strings. Pure functions of state.

use chrono::{DateTime, NaiveDateTime, Utc};
use shared_types::{CreditBalance, LeaderboardEntry};

use crate::host::Theme;

const ALGORITHM_PREVIEW_CHARS: usize = 200;
const LEADERBOARD_ID_CHARS: usize = 12;

/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` form (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn relative_date(raw: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(raw) else {
        return raw.to_string();
    };

    // Clock skew can put fresh items slightly in the future.
    let days = (now - date).num_days().max(0);
    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{days}d ago"),
        7..=29 => format!("{}w ago", days / 7),
        _ => date.format("%-m/%-d/%Y").to_string(),
    }
}

pub fn status_label(status: &str) -> String {
    status.replace('_', " ")
}

/// `N <unit>`; an absent balance renders as zero.
pub fn credits_label(balance: Option<&CreditBalance>, unit: &str) -> String {
    let amount = balance.map(|b| b.credits_balance).unwrap_or(0);
    format!("{amount} {unit}")
}

pub fn leaderboard_name(entry: &LeaderboardEntry) -> String {
    match entry.x_handle.as_deref().filter(|handle| !handle.is_empty()) {
        Some(handle) => format!("@{handle}"),
        None => entry.user_id.chars().take(LEADERBOARD_ID_CHARS).collect(),
    }
}

/// Server order is authoritative; rank is the position.
pub fn rank_label(index: usize) -> String {
    format!("#{}", index + 1)
}

pub fn algorithm_preview(prompt: &str) -> String {
    let head: String = prompt.chars().take(ALGORITHM_PREVIEW_CHARS).collect();
    format!("{head}...")
}

pub fn vote_marker(user_voted: bool) -> &'static str {
    if user_voted {
        "-"
    } else {
        "+"
    }
}

pub fn theme_toggle_glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "\u{2600}",
        Theme::Light => "\u{263E}",
    }
}

pub fn theme_toggle_title(theme: Theme) -> String {
    format!("Switch to {} mode", theme.next().as_str())
}
