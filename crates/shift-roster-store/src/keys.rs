//! Key encoding utilities for `RocksDB`.
//!
//! Week-scoped records are keyed `week || id` where `week` is the canonical
//! `YYYY-MM-DD` Monday. The week part is always ten bytes, so a week prefix
//! never matches a record from another week.

use shift_roster_core::{SlotId, UserId, Week};

/// Encode a user key (just the user ID bytes).
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Encode a week prefix for scanning all records of a week.
#[must_use]
pub fn week_prefix(week: &Week) -> Vec<u8> {
    week.key_bytes()
}

/// Encode an availability key: `week || user_id`.
#[must_use]
pub fn availability_key(week: &Week, user_id: &UserId) -> Vec<u8> {
    let mut key = week.key_bytes();
    key.extend_from_slice(user_id.as_bytes());
    key
}

/// Encode a shift key: `week || slot_id`.
#[must_use]
pub fn shift_key(week: &Week, slot_id: &SlotId) -> Vec<u8> {
    let mut key = week.key_bytes();
    key.extend_from_slice(slot_id.to_string().as_bytes());
    key
}
