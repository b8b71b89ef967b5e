//! Time handling for observation timestamps and archive dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of characters of a timestamp shown on the page (`YYYY-MM-DD HH:MM:SS`).
pub const DISPLAY_TIME_LEN: usize = 19;

/// Archive date format used by the `idate` query parameter.
pub const IDATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum TimeParseError {
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
    #[error("No such calendar date: {0}")]
    InvalidDate(String),
}

/// Truncate a raw timestamp to its displayed prefix.
///
/// Database timestamps carry fractional seconds and offsets
/// (`2021-03-05 12:34:56.789-05`); only the first 19 characters are shown.
pub fn display_time(raw: &str) -> &str {
    match raw.char_indices().nth(DISPLAY_TIME_LEN) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

/// Parse an `idate` value (`YYYYMMDD`).
pub fn parse_idate(s: &str) -> Result<NaiveDate, TimeParseError> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::InvalidFormat(s.to_string()));
    }
    NaiveDate::parse_from_str(s, IDATE_FORMAT).map_err(|_| TimeParseError::InvalidDate(s.to_string()))
}

/// Format a date as an `idate` value.
pub fn format_idate(date: NaiveDate) -> String {
    date.format(IDATE_FORMAT).to_string()
}

/// Resolve the archive date selected by an optional `idate` parameter.
///
/// Absent or empty selects `today`.
pub fn resolve_idate(param: Option<&str>, today: NaiveDate) -> Result<NaiveDate, TimeParseError> {
    match param.map(str::trim) {
        None | Some("") => Ok(today),
        Some(s) => parse_idate(s),
    }
}

/// Deployment window bounding the archive calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveWindow {
    /// First day with archived data.
    pub first: NaiveDate,
    /// Last day with archived data. `None` means the deployment is ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<NaiveDate>,
}

impl ArchiveWindow {
    pub fn new(first: NaiveDate, last: Option<NaiveDate>) -> Self {
        Self { first, last }
    }

    /// Upper selectable bound; an ongoing deployment ends today.
    pub fn last_or(&self, today: NaiveDate) -> NaiveDate {
        self.last.unwrap_or(today)
    }

    /// Whether `date` is selectable.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.first && date <= self.last_or(today)
    }

    /// Clamp `date` into the window. Used to pick the calendar's initial date.
    pub fn clamp(&self, date: NaiveDate, today: NaiveDate) -> NaiveDate {
        let last = self.last_or(today);
        if date < self.first {
            self.first
        } else if date > last {
            last
        } else {
            date
        }
    }
}
