//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User directory, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Availability records, keyed by `week || user_id`.
    pub const AVAILABILITY: &str = "availability";

    /// Shift assignments, keyed by `week || slot_id`.
    pub const SHIFTS: &str = "shifts";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::USERS, cf::AVAILABILITY, cf::SHIFTS]
}
