//! `RocksDB` storage layer for shift-roster.
//!
//! This crate provides persistent storage for users, weekly availability and
//! shift assignments using `RocksDB` with one column family per record kind.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `users`: The user directory, keyed by `user_id`
//! - `availability`: One record per soldier and week, keyed by `week || user_id`
//! - `shifts`: One record per slot and week, keyed by `week || slot_id`
//!
//! Week-scoped reads are prefix scans over the week part of the key.
//!
//! # Example
//!
//! ```no_run
//! use shift_roster_core::Week;
//! use shift_roster_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/shift-roster-db").unwrap();
//!
//! // List the schedule of a week
//! let week = Week::parse("2024-01-01").unwrap();
//! let shifts = store.list_shifts_by_week(&week).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;
pub mod types;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;
pub use types::{AvailabilityRecord, Role, ShiftAssignment, User};

use shift_roster_core::{SlotId, UserId, Week};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert or update a user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_user(&self, user: &User) -> Result<()>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// List all users in directory (ID) order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_users(&self) -> Result<Vec<User>>;

    // =========================================================================
    // Availability Operations
    // =========================================================================

    /// Insert or replace the availability record for `(record.user_id, record.week)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_availability(&self, record: &AvailabilityRecord) -> Result<()>;

    /// Get one soldier's availability for a week.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_availability(&self, user_id: &UserId, week: &Week)
        -> Result<Option<AvailabilityRecord>>;

    /// List every availability record submitted for a week.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_availability_by_week(&self, week: &Week) -> Result<Vec<AvailabilityRecord>>;

    // =========================================================================
    // Shift Operations
    // =========================================================================

    /// Insert or replace the assignment for `(shift.slot_id, shift.week)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_shift(&self, shift: &ShiftAssignment) -> Result<()>;

    /// Get the assignment of one slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_shift(&self, week: &Week, slot_id: &SlotId) -> Result<Option<ShiftAssignment>>;

    /// Delete the assignment of one slot.
    ///
    /// Returns whether a record existed. Deleting an unfilled slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_shift(&self, week: &Week, slot_id: &SlotId) -> Result<bool>;

    /// List the assignments of a week in slot order (day, band, task).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_shifts_by_week(&self, week: &Week) -> Result<Vec<ShiftAssignment>>;

    /// Replace every assignment of `week` with `shifts` in one atomic write.
    ///
    /// Records in `shifts` whose week differs from `week` are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a record belongs
    /// to another week.
    fn replace_week_shifts(&self, week: &Week, shifts: &[ShiftAssignment]) -> Result<()>;
}
