//! Week partition keys.
//!
//! A week is identified by the ISO date (`YYYY-MM-DD`) of its Monday. Any valid
//! date is accepted and normalized to the Monday of its ISO week, so
//! `2024-01-03` and `2024-01-01` address the same week.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const FORMAT: &str = "%Y-%m-%d";

/// A week, identified by its Monday.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Week(NaiveDate);

impl Week {
    /// The week that contains `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        Self(date - Duration::days(offset))
    }

    /// Parse a week from an ISO date string, normalizing to its Monday.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a `YYYY-MM-DD` date or falls
    /// outside the four-digit year range.
    pub fn parse(s: &str) -> Result<Self, WeekError> {
        let date = NaiveDate::parse_from_str(s.trim(), FORMAT)
            .map_err(|_| WeekError::InvalidDate(s.to_string()))?;
        let week = Self::containing(date);
        if !(1..=9999).contains(&week.0.year()) {
            return Err(WeekError::OutOfRange(s.to_string()));
        }
        Ok(week)
    }

    /// Key bytes for this week (the canonical string form).
    #[must_use]
    pub fn key_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Debug for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week({})", self.0.format(FORMAT))
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for Week {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Week {
    type Error = WeekError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Week> for String {
    fn from(week: Week) -> Self {
        week.to_string()
    }
}

/// Errors that can occur when parsing a week.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeekError {
    /// The input is not an ISO `YYYY-MM-DD` date.
    #[error("'{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),

    /// The date falls outside the four-digit year range.
    #[error("'{0}' is outside the supported year range")]
    OutOfRange(String),
}
