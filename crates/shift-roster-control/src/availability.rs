//! Availability intake and submission status.
//!
//! Soldiers submit one preference record per week; a later submission
//! replaces the earlier one. Managers read the records back to see who is
//! still missing before running auto-assignment.

use std::collections::HashMap;

use chrono::Utc;
use shift_roster_core::{UserId, Week};
use shift_roster_store::{AvailabilityRecord, Store};

use crate::error::{Result, RosterError};
use crate::input;
use crate::types::{AvailabilityStatus, SoldierStatus, StatusSummary, SubmitAvailabilityRequest};

/// Validate and store a soldier's availability for a week.
///
/// The user's current display name is copied into the record.
///
/// # Errors
///
/// Returns an error if:
/// - `userId`, `week` or `preferences` is missing
/// - The week or user id is malformed
/// - The user is not in the directory
pub fn submit<S: Store>(store: &S, request: SubmitAvailabilityRequest) -> Result<AvailabilityRecord> {
    let user_id = input::user_id(&input::required(request.user_id, "userId")?)?;
    let week = input::week(request.week)?;
    let preferences = request
        .preferences
        .ok_or_else(|| RosterError::missing("preferences"))?;

    let user = store
        .get_user(&user_id)?
        .ok_or(RosterError::UserNotFound(user_id))?;

    let record = AvailabilityRecord {
        user_id: user.id,
        user_name: user.name,
        week,
        preferences,
        submitted_at: Utc::now(),
    };

    store.put_availability(&record)?;

    Ok(record)
}

/// Get one soldier's record for a week.
///
/// # Errors
///
/// Returns `RosterError::AvailabilityNotFound` if the soldier has not submitted.
pub fn get<S: Store>(store: &S, user_id: &UserId, week: &Week) -> Result<AvailabilityRecord> {
    store
        .get_availability(user_id, week)?
        .ok_or_else(|| RosterError::AvailabilityNotFound {
            user_id: user_id.clone(),
            week: *week,
        })
}

/// Records for a week, keyed by soldier.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn by_user<S: Store>(store: &S, week: &Week) -> Result<HashMap<UserId, AvailabilityRecord>> {
    Ok(store
        .list_availability_by_week(week)?
        .into_iter()
        .map(|record| (record.user_id.clone(), record))
        .collect())
}

/// Who has and has not submitted for a week.
///
/// Only soldiers are listed; managers do not submit availability.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn status<S: Store>(store: &S, week: &Week) -> Result<AvailabilityStatus> {
    let mut records = by_user(store, week)?;

    let soldiers: Vec<SoldierStatus> = store
        .list_users()?
        .into_iter()
        .filter(shift_roster_store::User::is_soldier)
        .map(|user| {
            let record = records.remove(&user.id);
            SoldierStatus {
                submitted: record.is_some(),
                submitted_at: record.as_ref().map(|r| r.submitted_at),
                preferences: record.map(|r| r.preferences),
                user_id: user.id,
                user_name: user.name,
                phone: user.phone,
            }
        })
        .collect();

    let submitted = soldiers.iter().filter(|s| s.submitted).count();
    let summary = StatusSummary::new(submitted, soldiers.len());

    Ok(AvailabilityStatus {
        week: *week,
        soldiers,
        summary,
    })
}
