//! Collaborator contracts consumed by the core.
//!
//! Persistence proper lives outside this library; these traits are the
//! in-process seams through which the trigger engine and schedule evaluator
//! read their world. `MemoryStore` is the concrete double used by tests and
//! the CLI scenario runner. Only the checkpoint marker is expected to
//! survive process restarts; everything else is ambient state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityInterval;
use crate::error::StoreError;
use crate::schedule::FocusSchedule;

/// A focus session; `end` is set once the session completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    pub workflow_id: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl FocusSession {
    pub fn completed(&self) -> bool {
        self.end.is_some()
    }
}

/// User preferences gating the smart-session trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartSessionPreferences {
    pub enabled: bool,
    /// Rolling window for the doomscroll check
    pub doomscroll_duration_minutes: i64,
    /// Rolling window for the creating check
    pub trigger_duration_minutes: i64,
}

impl Default for SmartSessionPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            doomscroll_duration_minutes: 30,
            trigger_duration_minutes: 10,
        }
    }
}

/// A schedule joined with its workflow's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWithWorkflow {
    pub schedule: FocusSchedule,
    pub workflow_name: String,
}

/// Supplies tagged activity intervals for a time range.
///
/// Implementations return intervals whose `[start, end)` overlaps the query
/// range, ordered ascending by start. Tag filtering is the store's concern.
pub trait IntervalStore {
    fn fetch_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ActivityInterval>, StoreError>;
}

/// Supplies active schedules with denormalized workflow names.
pub trait ScheduleStore {
    fn active_schedules(&self) -> Result<Vec<ScheduleWithWorkflow>, StoreError>;
}

/// Supplies session state and trigger preferences.
pub trait SessionStore {
    fn in_progress(&self) -> Result<Option<FocusSession>, StoreError>;
    fn most_recent_completed(&self) -> Result<Option<FocusSession>, StoreError>;
    fn preferences(&self) -> Result<SmartSessionPreferences, StoreError>;
}

/// Persisted key-value marker for the last trigger check.
///
/// The only collaborator whose state survives restarts.
pub trait CheckpointStore {
    fn last_session_check(&self) -> Result<Option<DateTime<Utc>>, StoreError>;
    fn set_last_session_check(&mut self, at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// In-memory implementation of every collaborator contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub intervals: Vec<ActivityInterval>,
    pub schedules: Vec<ScheduleWithWorkflow>,
    pub in_progress: Option<FocusSession>,
    /// Completed sessions, any order; the latest `end` wins
    pub completed: Vec<FocusSession>,
    pub preferences: SmartSessionPreferences,
    pub last_session_check: Option<DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntervalStore for MemoryStore {
    fn fetch_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ActivityInterval>, StoreError> {
        let mut out: Vec<ActivityInterval> = self
            .intervals
            .iter()
            .filter(|i| i.overlaps(start, end))
            .cloned()
            .collect();
        out.sort_by_key(|i| i.start);
        Ok(out)
    }
}

impl ScheduleStore for MemoryStore {
    fn active_schedules(&self) -> Result<Vec<ScheduleWithWorkflow>, StoreError> {
        Ok(self.schedules.clone())
    }
}

impl SessionStore for MemoryStore {
    fn in_progress(&self) -> Result<Option<FocusSession>, StoreError> {
        Ok(self.in_progress.clone())
    }

    fn most_recent_completed(&self) -> Result<Option<FocusSession>, StoreError> {
        Ok(self
            .completed
            .iter()
            .filter(|s| s.completed())
            .max_by_key(|s| s.end)
            .cloned())
    }

    fn preferences(&self) -> Result<SmartSessionPreferences, StoreError> {
        Ok(self.preferences.clone())
    }
}

impl CheckpointStore for MemoryStore {
    fn last_session_check(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.last_session_check)
    }

    fn set_last_session_check(&mut self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.last_session_check = Some(at);
        Ok(())
    }
}
