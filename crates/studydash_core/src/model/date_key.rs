//! Canonical `YYYY-MM-DD` calendar day keys.
//!
//! # Invariants
//! - A `DateKey` always holds a real calendar date.
//! - `DateKey::parse(key.to_string())` returns the same key.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Month};

const DATE_KEY_LEN: usize = 10;

/// Validated calendar day used as a key in the per-day task map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(Date);

impl DateKey {
    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// Returns `None` for malformed strings and impossible dates
    /// (e.g. `2025-02-30`).
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != DATE_KEY_LEN {
            return None;
        }
        Date::parse(value, format_description!("[year]-[month]-[day]")).ok().map(Self)
    }

    /// Builds a key from year, 1-based month and day.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Monday-first weekday index (Monday = 0, Sunday = 6).
    pub fn weekday_index(self) -> usize {
        usize::from(self.0.weekday().number_days_from_monday())
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value.trim()).ok_or_else(|| format!("invalid date `{value}`; expected YYYY-MM-DD"))
    }
}
