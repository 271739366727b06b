//! Domain types stored in the database.
//!
//! These types represent the persisted state of users, availability and shifts.
//! They are also the JSON bodies the gateway returns, so field names are
//! camelCase.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shift_roster_core::{AvailabilityGrid, SlotId, UserId, Week};

/// A user in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier, derived from the creation time.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Phone number; the login key.
    pub phone: String,
    /// Role in the unit.
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Whether this user is part of the assignable roster.
    #[must_use]
    pub fn is_soldier(&self) -> bool {
        self.role == Role::Soldier
    }
}

/// What a user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Edits the schedule and sees everyone's availability.
    Manager,
    /// Submits availability and receives shifts.
    #[default]
    Soldier,
}

impl Role {
    /// The wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Soldier => "soldier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "soldier" => Ok(Self::Soldier),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// A soldier's preferences for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    /// Who submitted.
    pub user_id: UserId,
    /// Name of the submitter at submission time.
    pub user_name: String,
    /// The week the preferences apply to.
    pub week: Week,
    /// One preference per cell.
    pub preferences: AvailabilityGrid,
    /// Time of the latest submission.
    pub submitted_at: DateTime<Utc>,
}

/// The soldier holding one slot of one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftAssignment {
    /// The slot, e.g. `sg_0_0`.
    pub slot_id: SlotId,
    /// The week.
    pub week: Week,
    /// Display name of the assigned soldier.
    pub soldier_name: String,
    /// Set when the assignment was produced by auto-assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soldier_id: Option<UserId>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
