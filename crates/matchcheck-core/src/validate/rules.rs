//! Domain rules: how outcome, points and kickoff time relate to raw cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Result of a match from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    pub fn from_scores(home: i64, away: i64) -> Self {
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Label used in the `match_outcome` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::HomeWin => "Home Win",
            Outcome::AwayWin => "Away Win",
            Outcome::Draw => "Draw",
        }
    }

    /// League points `(home, away)`: 3 for a win, 1 each for a draw.
    pub fn points(self) -> (i64, i64) {
        match self {
            Outcome::HomeWin => (3, 0),
            Outcome::AwayWin => (0, 3),
            Outcome::Draw => (1, 1),
        }
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Parse a timestamp to an absolute UTC instant.
///
/// Accepts RFC 3339 (`2024-08-16T19:00:00Z`), the same with a space separator
/// or a numeric offset, and naive date-times or bare dates, which are taken
/// as UTC. Returns `None` for anything else, including empty cells.
pub fn parse_utc(cell: &str) -> Option<DateTime<Utc>> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let spaced = s.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&spaced) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
