//! Roster service implementation.
//!
//! This module provides the `Roster` trait and the `RosterService`
//! implementation that coordinates the directory, availability intake,
//! shift editing and auto-assignment over a [`Store`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shift_roster_core::UserId;
use shift_roster_store::{AvailabilityRecord, Role, ShiftAssignment, Store, User};

use crate::assignment;
use crate::availability;
use crate::error::{Result, RosterError};
use crate::input;
use crate::types::{
    AutoAssignOutcome, AutoAssignRequest, AvailabilityStatus, CreateUserRequest, LoginRequest,
    RosterConfig, SaveAllShiftsRequest, SubmitAvailabilityRequest, UpdateShiftRequest,
};

/// Trait defining the roster operations.
///
/// Week arguments accept any date of the week; they are normalized to its Monday.
#[async_trait]
pub trait Roster: Send + Sync {
    // =========================================================================
    // Directory Operations
    // =========================================================================

    /// Find the user registered with a phone number.
    ///
    /// When several users share the number, the first in directory order wins.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Validation` if the phone is missing.
    /// Returns `RosterError::PhoneNotRegistered` if nobody has that number.
    async fn login(&self, request: LoginRequest) -> Result<User>;

    /// List every user in directory order.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Add a user to the directory.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Validation` if the name or phone is missing.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User>;

    // =========================================================================
    // Shift Operations
    // =========================================================================

    /// List a week's assignments in slot order.
    async fn list_shifts(&self, week: &str) -> Result<Vec<ShiftAssignment>>;

    /// Assign a soldier to one slot, or clear it when no name is given.
    ///
    /// Returns the stored assignment, or `None` if the slot is now empty.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::InvalidSlot` if the slot id is malformed.
    async fn update_shift(
        &self,
        slot_id: &str,
        request: UpdateShiftRequest,
    ) -> Result<Option<ShiftAssignment>>;

    /// Replace a week's schedule with the given assignments.
    ///
    /// Returns the number of stored assignments. Entries with an empty name
    /// leave their slot unfilled.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Validation` if the week or assignments are missing.
    async fn save_all_shifts(&self, request: SaveAllShiftsRequest) -> Result<usize>;

    /// Run auto-assignment for a week and store the result as its schedule.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::NoSoldiers` if the directory holds no soldiers.
    async fn auto_assign(&self, request: AutoAssignRequest) -> Result<AutoAssignOutcome>;

    // =========================================================================
    // Availability Operations
    // =========================================================================

    /// List every availability record submitted for a week.
    async fn list_availability(&self, week: &str) -> Result<Vec<AvailabilityRecord>>;

    /// Store a soldier's availability for a week, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::UserNotFound` if the user is not in the directory.
    async fn submit_availability(
        &self,
        request: SubmitAvailabilityRequest,
    ) -> Result<AvailabilityRecord>;

    /// Who has and has not submitted availability for a week.
    async fn availability_status(&self, week: &str) -> Result<AvailabilityStatus>;

    /// One soldier's availability for a week.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::AvailabilityNotFound` if nothing was submitted.
    async fn get_availability(&self, user_id: &str, week: &str) -> Result<AvailabilityRecord>;
}

/// The main roster service implementation.
pub struct RosterService<S: Store> {
    store: Arc<S>,
    config: RosterConfig,
    /// Serializes id allocation with the write that claims the id.
    id_lock: Mutex<()>,
}

impl<S: Store> RosterService<S> {
    /// Create a new roster service.
    #[must_use]
    pub fn new(store: Arc<S>, config: RosterConfig) -> Self {
        Self {
            store,
            config,
            id_lock: Mutex::new(()),
        }
    }

    /// Create with default configuration.
    #[must_use]
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, RosterConfig::default())
    }

    /// The next unused id at or after `millis`.
    fn next_user_id(&self, mut millis: i64) -> Result<UserId> {
        loop {
            let id = UserId::from_millis(millis);
            if self.store.get_user(&id)?.is_none() {
                return Ok(id);
            }
            millis += 1;
        }
    }
}

#[async_trait]
impl<S: Store + 'static> Roster for RosterService<S> {
    // =========================================================================
    // Directory Operations
    // =========================================================================

    async fn login(&self, request: LoginRequest) -> Result<User> {
        let phone = input::required(request.phone, "phone")?;

        let user = self
            .store
            .list_users()?
            .into_iter()
            .find(|user| user.phone == phone)
            .ok_or(RosterError::PhoneNotRegistered(phone))?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.list_users()?)
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let name = input::required(request.name, "name")?;
        let phone = input::required(request.phone, "phone")?;

        let user = {
            let _guard = self.id_lock.lock();
            let user = User {
                id: self.next_user_id(Utc::now().timestamp_millis())?,
                name,
                phone,
                role: request.role.unwrap_or(Role::Soldier),
            };
            self.store.put_user(&user)?;
            user
        };

        tracing::info!(
            user_id = %user.id,
            name = %user.name,
            role = %user.role,
            "Created user"
        );

        Ok(user)
    }

    // =========================================================================
    // Shift Operations
    // =========================================================================

    async fn list_shifts(&self, week: &str) -> Result<Vec<ShiftAssignment>> {
        let week = input::week_str(week)?;
        Ok(self.store.list_shifts_by_week(&week)?)
    }

    async fn update_shift(
        &self,
        slot_id: &str,
        request: UpdateShiftRequest,
    ) -> Result<Option<ShiftAssignment>> {
        let slot_id = input::slot(slot_id)?;
        let week = input::week(request.week)?;

        let Ok(soldier_name) = input::required(request.soldier_name, "soldierName") else {
            let existed = self.store.delete_shift(&week, &slot_id)?;
            tracing::info!(week = %week, slot_id = %slot_id, existed, "Cleared shift");
            return Ok(None);
        };

        let shift = ShiftAssignment {
            slot_id,
            week,
            soldier_name,
            soldier_id: None,
            updated_at: Utc::now(),
        };

        self.store.put_shift(&shift)?;

        tracing::info!(
            week = %week,
            slot_id = %slot_id,
            soldier = %shift.soldier_name,
            "Updated shift"
        );

        Ok(Some(shift))
    }

    async fn save_all_shifts(&self, request: SaveAllShiftsRequest) -> Result<usize> {
        let week = input::week(request.week)?;
        let entries = request
            .shift_assignments
            .ok_or_else(|| RosterError::missing("shiftAssignments"))?;

        let now = Utc::now();
        let mut shifts = Vec::with_capacity(entries.len());
        for (slot_id, soldier_name) in entries {
            let slot_id = input::slot(&slot_id)?;
            let soldier_name = soldier_name.trim();
            if soldier_name.is_empty() {
                continue;
            }
            shifts.push(ShiftAssignment {
                slot_id,
                week,
                soldier_name: soldier_name.to_string(),
                soldier_id: None,
                updated_at: now,
            });
        }

        self.store.replace_week_shifts(&week, &shifts)?;

        tracing::info!(week = %week, shifts = shifts.len(), "Saved week schedule");

        Ok(shifts.len())
    }

    async fn auto_assign(&self, request: AutoAssignRequest) -> Result<AutoAssignOutcome> {
        let week = input::week(request.week)?;

        let soldiers: Vec<User> = self
            .store
            .list_users()?
            .into_iter()
            .filter(User::is_soldier)
            .collect();
        let roster: Vec<UserId> = soldiers.iter().map(|s| s.id.clone()).collect();
        let records = availability::by_user(&*self.store, &week)?;

        let result = assignment::assign(&week, &self.config.tasks, &roster, &records)?;

        let names: std::collections::HashMap<&UserId, &str> = soldiers
            .iter()
            .map(|s| (&s.id, s.name.as_str()))
            .collect();

        let now = Utc::now();
        let mut shifts = Vec::with_capacity(result.len());
        let mut assignments = BTreeMap::new();
        for (slot_id, user_id) in result.iter() {
            let name = names
                .get(user_id)
                .copied()
                .ok_or_else(|| RosterError::Internal(format!("{user_id} is not on the roster")))?;
            assignments.insert(*slot_id, name.to_string());
            shifts.push(ShiftAssignment {
                slot_id: *slot_id,
                week,
                soldier_name: name.to_string(),
                soldier_id: Some(user_id.clone()),
                updated_at: now,
            });
        }

        self.store.replace_week_shifts(&week, &shifts)?;

        tracing::info!(
            week = %week,
            soldiers = roster.len(),
            submitted = records.len(),
            assigned = shifts.len(),
            "Auto assignment completed"
        );

        Ok(AutoAssignOutcome {
            week,
            assigned_shifts: shifts.len(),
            assignments,
        })
    }

    // =========================================================================
    // Availability Operations
    // =========================================================================

    async fn list_availability(&self, week: &str) -> Result<Vec<AvailabilityRecord>> {
        let week = input::week_str(week)?;
        Ok(self.store.list_availability_by_week(&week)?)
    }

    async fn submit_availability(
        &self,
        request: SubmitAvailabilityRequest,
    ) -> Result<AvailabilityRecord> {
        let record = availability::submit(&*self.store, request)?;

        tracing::info!(
            user_id = %record.user_id,
            week = %record.week,
            unavailable = record.preferences.count(shift_roster_core::SlotPreference::Unavailable),
            "Availability submitted"
        );

        Ok(record)
    }

    async fn availability_status(&self, week: &str) -> Result<AvailabilityStatus> {
        let week = input::week_str(week)?;
        availability::status(&*self.store, &week)
    }

    async fn get_availability(&self, user_id: &str, week: &str) -> Result<AvailabilityRecord> {
        let user_id = input::user_id(user_id)?;
        let week = input::week_str(week)?;
        availability::get(&*self.store, &user_id, &week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_roster_core::{AvailabilityGrid, Task};
    use shift_roster_store::RocksStore;
    use tempfile::TempDir;

    fn setup() -> (RosterService<RocksStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        (RosterService::with_defaults(store), dir)
    }

    fn week_request(week: &str) -> AutoAssignRequest {
        AutoAssignRequest {
            week: Some(week.to_string()),
        }
    }

    #[tokio::test]
    async fn create_user_defaults_to_soldier() {
        let (service, _dir) = setup();

        let user = service
            .create_user(CreateUserRequest::soldier("Dana", "0501111111"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Soldier);
        assert_eq!(service.list_users().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn create_user_requires_name_and_phone() {
        let (service, _dir) = setup();

        let result = service
            .create_user(CreateUserRequest {
                name: Some("Dana".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(RosterError::Validation(_))));
    }

    #[tokio::test]
    async fn user_ids_are_unique_and_ordered() {
        let (service, _dir) = setup();

        let mut ids = Vec::new();
        for i in 0..5 {
            let user = service
                .create_user(CreateUserRequest::soldier(format!("S{i}"), format!("05{i}")))
                .await
                .unwrap();
            ids.push(user.id);
        }

        let listed: Vec<_> = service.list_users().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() {
        let (service, _dir) = setup();
        let service = Arc::new(service);

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .create_user(CreateUserRequest::soldier(format!("S{i}"), format!("05{i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().id);
        }

        assert_eq!(ids.len(), 32);
        assert_eq!(service.list_users().await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn login_by_phone() {
        let (service, _dir) = setup();
        let manager = service
            .create_user(CreateUserRequest::manager("Avi", "0500000000"))
            .await
            .unwrap();

        let user = service
            .login(LoginRequest {
                phone: Some("0500000000".into()),
            })
            .await
            .unwrap();
        assert_eq!(user, manager);

        let missing = service.login(LoginRequest::default()).await;
        assert!(matches!(missing, Err(RosterError::Validation(_))));

        let unknown = service
            .login(LoginRequest {
                phone: Some("0509999999".into()),
            })
            .await;
        assert!(matches!(unknown, Err(RosterError::PhoneNotRegistered(_))));
    }

    #[tokio::test]
    async fn update_shift_upserts_and_clears() {
        let (service, _dir) = setup();

        let shift = service
            .update_shift(
                "patrol_2_1",
                UpdateShiftRequest {
                    week: Some("2024-01-01".into()),
                    soldier_name: Some("Dana".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shift.soldier_name, "Dana");
        assert!(shift.soldier_id.is_none());
        assert_eq!(service.list_shifts("2024-01-01").await.unwrap().len(), 1);

        let cleared = service
            .update_shift(
                "patrol_2_1",
                UpdateShiftRequest {
                    week: Some("2024-01-01".into()),
                    soldier_name: Some(String::new()),
                },
            )
            .await
            .unwrap();
        assert!(cleared.is_none());
        assert!(service.list_shifts("2024-01-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_shift_rejects_bad_slot() {
        let (service, _dir) = setup();

        let result = service
            .update_shift(
                "sg_7_0",
                UpdateShiftRequest {
                    week: Some("2024-01-01".into()),
                    soldier_name: Some("Dana".into()),
                },
            )
            .await;
        assert!(matches!(result, Err(RosterError::InvalidSlot(_))));
    }

    #[tokio::test]
    async fn save_all_replaces_week() {
        let (service, _dir) = setup();
        let request = |entries: &[(&str, &str)]| SaveAllShiftsRequest {
            week: Some("2024-01-01".into()),
            shift_assignments: Some(
                entries
                    .iter()
                    .map(|(slot, name)| ((*slot).to_string(), (*name).to_string()))
                    .collect(),
            ),
        };

        let count = service
            .save_all_shifts(request(&[("sg_0_0", "Avi"), ("sg_0_1", "Bar"), ("sg_0_2", "")]))
            .await
            .unwrap();
        assert_eq!(count, 2);

        let count = service.save_all_shifts(request(&[("sg_0_0", "Dana")])).await.unwrap();
        assert_eq!(count, 1);

        let shifts = service.list_shifts("2024-01-01").await.unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].slot_id.to_string(), "sg_0_0");
        assert_eq!(shifts[0].soldier_name, "Dana");
    }

    #[tokio::test]
    async fn save_all_requires_assignments() {
        let (service, _dir) = setup();
        let result = service
            .save_all_shifts(SaveAllShiftsRequest {
                week: Some("2024-01-01".into()),
                shift_assignments: None,
            })
            .await;
        assert!(matches!(result, Err(RosterError::Validation(_))));
    }

    #[tokio::test]
    async fn auto_assign_without_soldiers() {
        let (service, _dir) = setup();
        service
            .create_user(CreateUserRequest::manager("Avi", "050"))
            .await
            .unwrap();

        let result = service.auto_assign(week_request("2024-01-01")).await;
        assert!(matches!(result, Err(RosterError::NoSoldiers)));
    }

    #[tokio::test]
    async fn auto_assign_persists_schedule() {
        let (service, _dir) = setup();
        let dana = service
            .create_user(CreateUserRequest::soldier("Dana", "051"))
            .await
            .unwrap();
        service
            .create_user(CreateUserRequest::soldier("Bar", "052"))
            .await
            .unwrap();

        // A manual edit from before is replaced.
        service
            .save_all_shifts(SaveAllShiftsRequest {
                week: Some("2024-01-01".into()),
                shift_assignments: Some([("sg_0_0".to_string(), "Avi".to_string())].into()),
            })
            .await
            .unwrap();

        let outcome = service.auto_assign(week_request("2024-01-03")).await.unwrap();
        assert_eq!(outcome.assigned_shifts, 84);
        assert_eq!(outcome.week.to_string(), "2024-01-01");
        assert_eq!(outcome.assignments.values().filter(|n| *n == "Dana").count(), 42);

        let shifts = service.list_shifts("2024-01-01").await.unwrap();
        assert_eq!(shifts.len(), 84);
        assert_eq!(shifts[0].soldier_name, "Dana");
        assert_eq!(shifts[0].soldier_id.as_ref(), Some(&dana.id));
    }

    #[tokio::test]
    async fn auto_assign_respects_unavailability() {
        let (service, _dir) = setup();
        let dana = service
            .create_user(CreateUserRequest::soldier("Dana", "051"))
            .await
            .unwrap();
        service
            .submit_availability(SubmitAvailabilityRequest {
                user_id: Some(dana.id.to_string()),
                week: Some("2024-01-01".into()),
                preferences: Some(AvailabilityGrid::all_unavailable()),
            })
            .await
            .unwrap();

        let outcome = service.auto_assign(week_request("2024-01-01")).await.unwrap();
        assert_eq!(outcome.assigned_shifts, 0);
        assert!(outcome.assignments.is_empty());
        assert!(service.list_shifts("2024-01-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn configured_tasks_limit_auto_assign() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RocksStore::open(dir.path()).unwrap());
        let service = RosterService::new(
            store,
            RosterConfig {
                tasks: vec![Task::Patrol],
            },
        );
        service
            .create_user(CreateUserRequest::soldier("Dana", "051"))
            .await
            .unwrap();

        let outcome = service.auto_assign(week_request("2024-01-01")).await.unwrap();
        assert_eq!(outcome.assigned_shifts, 28);
    }

    #[tokio::test]
    async fn availability_round_trip_through_service() {
        let (service, _dir) = setup();
        let dana = service
            .create_user(CreateUserRequest::soldier("Dana", "051"))
            .await
            .unwrap();

        service
            .submit_availability(SubmitAvailabilityRequest {
                user_id: Some(dana.id.to_string()),
                week: Some("2024-01-02".into()),
                preferences: Some(AvailabilityGrid::neutral()),
            })
            .await
            .unwrap();

        let record = service
            .get_availability(dana.id.as_str(), "2024-01-01")
            .await
            .unwrap();
        assert_eq!(record.user_name, "Dana");
        assert_eq!(service.list_availability("2024-01-07").await.unwrap().len(), 1);

        let status = service.availability_status("2024-01-01").await.unwrap();
        assert_eq!(status.summary.submitted, 1);
        assert_eq!(status.summary.percentage, 100);
    }
}
