//! Automatic shift assignment.
//!
//! The engine walks every slot of a week once, day by day, then time band,
//! then task, and gives each slot to the available soldier with the fewest
//! shifts so far. Ties go to the soldier listed first in the roster.
//!
//! A soldier is available for a slot unless their record for the week marks
//! the slot's cell unavailable. Soldiers without a record are available
//! everywhere. Preferred cells carry no weight and there are no rest rules.
//!
//! The engine is pure: it reads nothing and writes nothing. Persisting the
//! result is the caller's job.

use std::collections::{BTreeMap, HashMap};

use shift_roster_core::{Cell, Slot, SlotId, Task, UserId, Week};
use shift_roster_store::AvailabilityRecord;

use crate::error::{Result, RosterError};

/// The outcome of one assignment run, keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    slots: BTreeMap<SlotId, UserId>,
}

impl Assignment {
    /// The soldier assigned to `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: &SlotId) -> Option<&UserId> {
        self.slots.get(slot)
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot was filled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Filled slots in week order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotId, &UserId)> {
        self.slots.iter()
    }

    /// Number of slots given to `user_id`.
    #[must_use]
    pub fn load_of(&self, user_id: &UserId) -> usize {
        self.slots.values().filter(|id| *id == user_id).count()
    }
}

/// Assign soldiers to every slot of `week` for the given tasks.
///
/// `availability` holds each soldier's record, keyed by user id. Records for
/// other weeks are ignored.
///
/// # Errors
///
/// Returns `RosterError::NoSoldiers` if `soldiers` is empty.
pub fn assign(
    week: &Week,
    tasks: &[Task],
    soldiers: &[UserId],
    availability: &HashMap<UserId, AvailabilityRecord>,
) -> Result<Assignment> {
    if soldiers.is_empty() {
        return Err(RosterError::NoSoldiers);
    }

    let blocked = |soldier: &UserId, cell: Cell| {
        availability
            .get(soldier)
            .filter(|record| record.week == *week)
            .is_some_and(|record| record.preferences.is_unavailable(cell))
    };

    let mut counts = vec![0usize; soldiers.len()];
    let mut assignment = Assignment::default();

    for slot in Slot::for_tasks(tasks) {
        let cell = slot.cell();
        // min_by_key keeps the first of equal minima
        let pick = soldiers
            .iter()
            .enumerate()
            .filter(|(_, soldier)| !blocked(*soldier, cell))
            .min_by_key(|(index, _)| counts[*index]);

        if let Some((index, soldier)) = pick {
            counts[index] += 1;
            assignment.slots.insert(slot, soldier.clone());
        }
    }

    Ok(assignment)
}
