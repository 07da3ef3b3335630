//! Session-trigger decision engine.
//!
//! Re-evaluated on each poll tick against the session stores and the
//! rolling activity window. Evaluation is read-only; the persisted
//! `last_session_check` marker only moves when the caller explicitly
//! records a check.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::TagKind;
use crate::classifier::is_dominant;
use crate::error::StoreError;
use crate::store::{CheckpointStore, FocusSession, IntervalStore, SessionStore};

/// Minimum age of both the last session end and the last recorded check
/// before a new suggestion may fire.
pub const COOLDOWN_MINUTES: i64 = 30;

/// Outcome of one trigger evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerVerdict {
    /// Nothing to suggest this poll
    None,
    /// Consuming dominated the doomscroll window
    Doomscroll,
    /// Creating dominated the trigger window
    Smart,
}

/// Decides whether to suggest a smart session or flag doomscrolling.
#[derive(Debug, Clone)]
pub struct TriggerEngine {
    cooldown: Duration,
}

impl Default for TriggerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerEngine {
    /// Engine with the standard 30-minute cooldown.
    pub fn new() -> Self {
        Self {
            cooldown: Duration::minutes(COOLDOWN_MINUTES),
        }
    }

    /// Engine with a custom cooldown.
    pub fn with_cooldown_minutes(minutes: i64) -> Self {
        Self {
            cooldown: Duration::minutes(minutes),
        }
    }

    /// Evaluate the trigger state machine at `now`.
    ///
    /// Store failures never escape a poll: they are logged and resolved to
    /// [`TriggerVerdict::None`].
    pub fn evaluate(
        &self,
        sessions: &dyn SessionStore,
        intervals: &dyn IntervalStore,
        checkpoints: &dyn CheckpointStore,
        now: DateTime<Utc>,
    ) -> TriggerVerdict {
        match self.try_evaluate(sessions, intervals, checkpoints, now) {
            Ok(verdict) => verdict,
            Err(err) => {
                log::warn!("trigger evaluation degraded to none: {err}");
                TriggerVerdict::None
            }
        }
    }

    fn try_evaluate(
        &self,
        sessions: &dyn SessionStore,
        intervals: &dyn IntervalStore,
        checkpoints: &dyn CheckpointStore,
        now: DateTime<Utc>,
    ) -> Result<TriggerVerdict, StoreError> {
        if sessions.in_progress()?.is_some() {
            return Ok(TriggerVerdict::None);
        }

        let Some(last_session) = sessions.most_recent_completed()? else {
            return Ok(TriggerVerdict::None);
        };
        let last_check = checkpoints.last_session_check()?;
        if !self.cooldown_satisfied(&last_session, last_check, now) {
            return Ok(TriggerVerdict::None);
        }

        let prefs = sessions.preferences()?;
        if !prefs.enabled {
            return Ok(TriggerVerdict::None);
        }

        let doom_start = now - Duration::minutes(prefs.doomscroll_duration_minutes);
        let fetched = intervals.fetch_range(doom_start, now)?;
        if is_dominant(&fetched, doom_start, now, &TagKind::Consuming) {
            log::debug!("consuming dominated the last {}min", prefs.doomscroll_duration_minutes);
            return Ok(TriggerVerdict::Doomscroll);
        }

        let create_start = now - Duration::minutes(prefs.trigger_duration_minutes);
        let fetched = intervals.fetch_range(create_start, now)?;
        if is_dominant(&fetched, create_start, now, &TagKind::Creating) {
            log::debug!("creating dominated the last {}min", prefs.trigger_duration_minutes);
            return Ok(TriggerVerdict::Smart);
        }

        Ok(TriggerVerdict::None)
    }

    /// Cooldown gate: both the session end and the last recorded check must
    /// be strictly older than the cooldown. A missing check marker passes
    /// that axis (its age is effectively infinite).
    pub fn cooldown_satisfied(
        &self,
        last_session: &FocusSession,
        last_check: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(end) = last_session.end else {
            return false;
        };
        let session_ok = now - end > self.cooldown;
        let check_ok = last_check.map_or(true, |check| now - check > self.cooldown);
        session_ok && check_ok
    }

    /// Persist `now` as the last trigger check. The only mutation this
    /// engine ever performs; callers decide when a poll counts as a check.
    pub fn record_check(
        &self,
        checkpoints: &mut dyn CheckpointStore,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        checkpoints.set_last_session_check(now)
    }
}
