//! Request and response types for roster operations.
//!
//! Request fields are optional so that a missing field surfaces as a
//! validation error from the service rather than a decoding failure.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shift_roster_core::{AvailabilityGrid, SlotId, Task, UserId, Week};
use shift_roster_store::Role;

/// Request to log in by phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// The phone number to look up.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request to add a user to the directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Role; soldier when absent.
    #[serde(default)]
    pub role: Option<Role>,
}

impl CreateUserRequest {
    /// Create a request for a soldier.
    #[must_use]
    pub fn soldier(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            phone: Some(phone.into()),
            role: None,
        }
    }

    /// Create a request for a manager.
    #[must_use]
    pub fn manager(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            role: Some(Role::Manager),
            ..Self::soldier(name, phone)
        }
    }
}

/// Request to submit a soldier's availability for a week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAvailabilityRequest {
    /// The submitting soldier.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Any date in the target week.
    #[serde(default)]
    pub week: Option<String>,
    /// The preferences, in three-list form.
    #[serde(default)]
    pub preferences: Option<AvailabilityGrid>,
}

/// Request to set or clear a single slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShiftRequest {
    /// Any date in the target week.
    #[serde(default)]
    pub week: Option<String>,
    /// The soldier to assign; empty or absent clears the slot.
    #[serde(default)]
    pub soldier_name: Option<String>,
}

/// Request to replace a whole week's schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAllShiftsRequest {
    /// Any date in the target week.
    #[serde(default)]
    pub week: Option<String>,
    /// Slot id to soldier name.
    #[serde(default)]
    pub shift_assignments: Option<BTreeMap<String, String>>,
}

/// Request to auto-assign a week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignRequest {
    /// Any date in the target week.
    #[serde(default)]
    pub week: Option<String>,
}

/// Result of an auto-assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignOutcome {
    /// The week that was assigned.
    pub week: Week,
    /// Number of slots that received a soldier.
    pub assigned_shifts: usize,
    /// Slot id to soldier name, in slot order.
    pub assignments: BTreeMap<SlotId, String>,
}

/// Submission state of one soldier for a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldierStatus {
    /// The soldier.
    pub user_id: UserId,
    /// Display name from the directory.
    pub user_name: String,
    /// Phone number, for chasing late submissions.
    pub phone: String,
    /// Whether a record exists for the week.
    pub submitted: bool,
    /// When the record was submitted.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// The submitted preferences.
    #[serde(default)]
    pub preferences: Option<AvailabilityGrid>,
}

/// Counts across all soldiers for a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Soldiers who submitted.
    pub submitted: usize,
    /// Soldiers who did not.
    pub pending: usize,
    /// All soldiers.
    pub total: usize,
    /// `submitted / total` as a rounded percentage; 0 without soldiers.
    pub percentage: usize,
}

impl StatusSummary {
    /// Summarize `submitted` out of `total` soldiers.
    #[must_use]
    pub const fn new(submitted: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            // round half up
            (submitted * 200 + total) / (total * 2)
        };
        Self {
            submitted,
            pending: total.saturating_sub(submitted),
            total,
            percentage,
        }
    }
}

/// Availability submission state of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStatus {
    /// The week.
    pub week: Week,
    /// One entry per soldier, in directory order.
    pub soldiers: Vec<SoldierStatus>,
    /// Totals.
    pub summary: StatusSummary,
}

/// Configuration for the roster service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Tasks to staff, in the order they are filled within a time band.
    pub tasks: Vec<Task>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            tasks: Task::ALL.to_vec(),
        }
    }
}
