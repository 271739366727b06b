//! Core types for shift-roster.
//!
//! This crate provides the foundational types used throughout the roster service:
//!
//! - **Identifiers**: the opaque [`UserId`]
//! - **Weeks**: [`Week`], always normalized to the Monday that starts the week
//! - **Slots**: the fixed `task x day x time band` grid that makes up a week
//! - **Preferences**: the per-cell [`AvailabilityGrid`] a soldier submits for a week
//!
//! # Example
//!
//! ```
//! use shift_roster_core::{Slot, Week};
//!
//! // Any date normalizes to the Monday of its ISO week.
//! let week = Week::parse("2024-01-03").unwrap();
//! assert_eq!(week.to_string(), "2024-01-01");
//!
//! // A week is 3 tasks x 7 days x 4 bands.
//! assert_eq!(Slot::all().count(), 84);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;
pub mod preferences;
pub mod slot;
pub mod week;

pub use ids::{IdError, UserId};
pub use preferences::{AvailabilityGrid, SlotPreference, WirePreferences};
pub use slot::{Cell, Day, Slot, SlotError, SlotId, Task, TimeBand};
pub use week::{Week, WeekError};
