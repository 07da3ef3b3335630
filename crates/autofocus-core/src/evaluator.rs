//! Schedule poll cycle: reminder and start actions with per-occurrence
//! deduplication.
//!
//! The evaluator is driven by an external timer at roughly one-minute
//! cadence. Each poll returns at most one action — the first actionable
//! schedule wins and the rest are deferred to the next tick. Dedup state is
//! instance-owned and in-memory only; a periodic cleanup pass bounds its
//! growth.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::schedule::FocusSchedule;
use crate::store::ScheduleStore;

/// Minutes-until bounds for firing a start action.
pub const START_WINDOW_MINUTES: (f64, f64) = (-2.0, 2.0);

/// Minutes-until bounds for firing a reminder.
pub const REMINDER_WINDOW_MINUTES: (f64, f64) = (14.0, 16.0);

/// Dedup keys older than this are pruned by the cleanup pass.
pub const KEY_MAX_AGE_HOURS: i64 = 24;

/// One computed occurrence of a schedule, with its workflow's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledOccurrence {
    pub schedule: FocusSchedule,
    pub workflow_name: String,
    pub occurrence: DateTime<Utc>,
}

/// Action handed to the caller-owned notifier / session starter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleAction {
    /// No schedule is actionable this poll
    None,
    /// An occurrence is 14-16 minutes out
    Reminder(ScheduledOccurrence),
    /// An occurrence is within two minutes
    Start(ScheduledOccurrence),
}

impl ScheduleAction {
    pub fn is_none(&self) -> bool {
        matches!(self, ScheduleAction::None)
    }
}

/// Evaluates schedules against the clock, deduplicating per occurrence.
#[derive(Debug, Clone, Default)]
pub struct ScheduleEvaluator {
    reminders_sent: HashSet<String>,
    starts_sent: HashSet<String>,
}

impl ScheduleEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one poll tick at `now`.
    ///
    /// Store failures never escape: they are logged and resolved to
    /// [`ScheduleAction::None`].
    pub fn poll(&mut self, schedules: &dyn ScheduleStore, now: DateTime<Utc>) -> ScheduleAction {
        match self.try_poll(schedules, now) {
            Ok(action) => action,
            Err(err) => {
                log::warn!("schedule poll degraded to none: {err}");
                ScheduleAction::None
            }
        }
    }

    fn try_poll(
        &mut self,
        schedules: &dyn ScheduleStore,
        now: DateTime<Utc>,
    ) -> Result<ScheduleAction, StoreError> {
        for entry in schedules.active_schedules()? {
            let Some(occurrence) = entry.schedule.next_occurrence(now) else {
                continue;
            };
            let minutes_until = (occurrence - now).num_seconds() as f64 / 60.0;
            let key = occurrence_key(&entry.schedule.id, occurrence);

            let (start_lo, start_hi) = START_WINDOW_MINUTES;
            let (remind_lo, remind_hi) = REMINDER_WINDOW_MINUTES;

            if (start_lo..=start_hi).contains(&minutes_until) {
                if self.starts_sent.insert(key) {
                    return Ok(ScheduleAction::Start(ScheduledOccurrence {
                        schedule: entry.schedule,
                        workflow_name: entry.workflow_name,
                        occurrence,
                    }));
                }
            } else if (remind_lo..=remind_hi).contains(&minutes_until)
                && self.reminders_sent.insert(key)
            {
                return Ok(ScheduleAction::Reminder(ScheduledOccurrence {
                    schedule: entry.schedule,
                    workflow_name: entry.workflow_name,
                    occurrence,
                }));
            }
        }
        Ok(ScheduleAction::None)
    }

    /// Drop dedup keys whose occurrence is more than 24 hours behind `now`.
    /// Keys whose occurrence suffix cannot be parsed are dropped too.
    pub fn cleanup(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::hours(KEY_MAX_AGE_HOURS);
        let fresh = |key: &String| match parse_occurrence_key(key) {
            Some(occurrence) => occurrence >= cutoff,
            None => false,
        };
        self.reminders_sent.retain(fresh);
        self.starts_sent.retain(fresh);
    }

    /// Forget all dedup state.
    pub fn reset(&mut self) {
        self.reminders_sent.clear();
        self.starts_sent.clear();
    }

    /// Number of occurrence keys currently tracked across both sets.
    pub fn tracked_key_count(&self) -> usize {
        self.reminders_sent.len() + self.starts_sent.len()
    }
}

/// Idempotency key for one occurrence of one schedule.
fn occurrence_key(schedule_id: &str, occurrence: DateTime<Utc>) -> String {
    format!("{}-{}", schedule_id, occurrence.to_rfc3339())
}

/// Recover the occurrence timestamp from a key. Schedule IDs may themselves
/// contain hyphens, so try the remainder after each one until something
/// parses as RFC 3339.
fn parse_occurrence_key(key: &str) -> Option<DateTime<Utc>> {
    for (idx, _) in key.match_indices('-') {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&key[idx + 1..]) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    None
}
