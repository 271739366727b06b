//! Identifier types for shift-roster.
//!
//! Users are keyed by an opaque string id. Newly created users get the creation
//! timestamp in milliseconds, which keeps ids unique and makes them sort in
//! creation order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque user identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parse a `UserId` from any non-empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(IdError::Whitespace);
        }
        Ok(Self(value))
    }

    /// Build a `UserId` from a millisecond timestamp.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the id bytes, used as storage keys.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for UserId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier is empty.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier contains whitespace.
    #[error("identifier must not contain whitespace")]
    Whitespace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_millis_is_the_decimal_form() {
        assert_eq!(UserId::from_millis(1_700_000_000_123).as_str(), "1700000000123");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(UserId::new(""), Err(IdError::Empty));
        assert_eq!(UserId::new("a b"), Err(IdError::Whitespace));
    }

    #[test]
    fn timestamp_ids_sort_in_creation_order() {
        let first = UserId::from_millis(1_700_000_000_000);
        let second = UserId::from_millis(1_700_000_000_001);
        assert!(first < second);
    }

    #[test]
    fn serde_json_rejects_empty() {
        let parsed: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: UserId = serde_json::from_str("\"1700000000000\"").unwrap();
        assert_eq!(parsed, UserId::from_millis(1_700_000_000_000));
    }
}
