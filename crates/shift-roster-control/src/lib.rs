//! Roster service for shift-roster.
//!
//! This crate provides the business logic of the roster: the user directory,
//! weekly availability intake, manual shift editing and automatic assignment.
//! It sits between the HTTP gateway and the storage layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Gateway (HTTP)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       RosterService                         │
//! │  ┌─────────────┐ ┌──────────────┐ ┌─────────────────────┐   │
//! │  │  Directory  │ │ Availability │ │  Shifts + Auto      │   │
//! │  │  + Login    │ │ Intake       │ │  Assignment         │   │
//! │  └─────────────┘ └──────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                       ┌──────────────┐
//!                       │    Store     │
//!                       │  (RocksDB)   │
//!                       └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use shift_roster_control::{AutoAssignRequest, Roster, RosterService};
//! use shift_roster_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/shift-roster")?);
//! let roster = RosterService::with_defaults(store);
//!
//! let outcome = roster
//!     .auto_assign(AutoAssignRequest { week: Some("2024-01-01".into()) })
//!     .await?;
//! println!("assigned {} shifts", outcome.assigned_shifts);
//! # Ok(())
//! # }
//! ```
//!
//! The assignment engine itself is the pure function [`assignment::assign`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assignment;
pub mod availability;
pub mod error;
mod input;
pub mod service;
pub mod types;

pub use assignment::Assignment;
pub use error::{Result, RosterError};
pub use service::{Roster, RosterService};
pub use types::{
    AutoAssignOutcome, AutoAssignRequest, AvailabilityStatus, CreateUserRequest, LoginRequest,
    RosterConfig, SaveAllShiftsRequest, SoldierStatus, StatusSummary, SubmitAvailabilityRequest,
    UpdateShiftRequest,
};

// Re-export commonly used types from dependencies for convenience
pub use shift_roster_core::{AvailabilityGrid, SlotId, UserId, Week};
pub use shift_roster_store::{AvailabilityRecord, Role, ShiftAssignment, User};
