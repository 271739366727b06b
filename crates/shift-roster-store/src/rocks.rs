//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};
use shift_roster_core::{SlotId, UserId, Week};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::types::{AvailabilityRecord, ShiftAssignment, User};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)?;
        tracing::debug!(path = %path.as_ref().display(), "Opened RocksDB store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Get and decode one value.
    fn get_value<T: serde::de::DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(&cf, key)?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Collect the keys and values of every entry whose key starts with `prefix`.
    fn scan_prefix(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<(Box<[u8]>, Box<[u8]>)>> {
        let cf = self.cf(cf_name)?;
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix, Direction::Forward));

        let mut entries = Vec::new();
        for item in iter {
            let (key, value) = item?;

            // Stop if we're past the prefix
            if !key.starts_with(prefix) {
                break;
            }

            entries.push((key, value));
        }

        Ok(entries)
    }

    /// Decode every value under `prefix`.
    fn list_prefix<T: serde::de::DeserializeOwned>(&self, cf_name: &str, prefix: &[u8]) -> Result<Vec<T>> {
        self.scan_prefix(cf_name, prefix)?
            .iter()
            .map(|(_, value)| Self::deserialize(value))
            .collect()
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn put_user(&self, user: &User) -> Result<()> {
        let cf = self.cf(cf::USERS)?;
        let key = keys::user_key(&user.id);
        let value = Self::serialize(user)?;

        self.db.put_cf(&cf, key, value)?;

        Ok(())
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        self.get_value(cf::USERS, &keys::user_key(user_id))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let cf = self.cf(cf::USERS)?;

        let mut users = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item?;
            users.push(Self::deserialize(&value)?);
        }

        Ok(users)
    }

    // =========================================================================
    // Availability Operations
    // =========================================================================

    fn put_availability(&self, record: &AvailabilityRecord) -> Result<()> {
        let cf = self.cf(cf::AVAILABILITY)?;
        let key = keys::availability_key(&record.week, &record.user_id);
        let value = Self::serialize(record)?;

        self.db.put_cf(&cf, key, value)?;

        Ok(())
    }

    fn get_availability(
        &self,
        user_id: &UserId,
        week: &Week,
    ) -> Result<Option<AvailabilityRecord>> {
        self.get_value(cf::AVAILABILITY, &keys::availability_key(week, user_id))
    }

    fn list_availability_by_week(&self, week: &Week) -> Result<Vec<AvailabilityRecord>> {
        self.list_prefix(cf::AVAILABILITY, &keys::week_prefix(week))
    }

    // =========================================================================
    // Shift Operations
    // =========================================================================

    fn put_shift(&self, shift: &ShiftAssignment) -> Result<()> {
        let cf = self.cf(cf::SHIFTS)?;
        let key = keys::shift_key(&shift.week, &shift.slot_id);
        let value = Self::serialize(shift)?;

        self.db.put_cf(&cf, key, value)?;

        Ok(())
    }

    fn get_shift(&self, week: &Week, slot_id: &SlotId) -> Result<Option<ShiftAssignment>> {
        self.get_value(cf::SHIFTS, &keys::shift_key(week, slot_id))
    }

    fn delete_shift(&self, week: &Week, slot_id: &SlotId) -> Result<bool> {
        let cf = self.cf(cf::SHIFTS)?;
        let key = keys::shift_key(week, slot_id);

        if self.db.get_pinned_cf(&cf, &key)?.is_none() {
            return Ok(false);
        }
        self.db.delete_cf(&cf, &key)?;

        Ok(true)
    }

    fn list_shifts_by_week(&self, week: &Week) -> Result<Vec<ShiftAssignment>> {
        let mut shifts: Vec<ShiftAssignment> =
            self.list_prefix(cf::SHIFTS, &keys::week_prefix(week))?;
        shifts.sort_by_key(|shift| shift.slot_id);
        Ok(shifts)
    }

    fn replace_week_shifts(&self, week: &Week, shifts: &[ShiftAssignment]) -> Result<()> {
        if let Some(stray) = shifts.iter().find(|shift| shift.week != *week) {
            return Err(StoreError::InvalidRecord(format!(
                "shift {} belongs to week {}, not {week}",
                stray.slot_id, stray.week
            )));
        }

        let cf = self.cf(cf::SHIFTS)?;
        let existing = self.scan_prefix(cf::SHIFTS, &keys::week_prefix(week))?;

        let mut batch = WriteBatch::default();
        for (key, _) in &existing {
            batch.delete_cf(&cf, key);
        }
        for shift in shifts {
            let key = keys::shift_key(week, &shift.slot_id);
            batch.put_cf(&cf, key, Self::serialize(shift)?);
        }

        self.db.write(batch)?;
        tracing::debug!(
            week = %week,
            removed = existing.len(),
            written = shifts.len(),
            "Replaced week shifts"
        );

        Ok(())
    }
}
