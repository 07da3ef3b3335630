//! TOML scenario files for driving the core against a fixed timeline.
//!
//! A scenario describes intervals, schedules, sessions and preferences; it
//! loads into a [`MemoryStore`] implementing every collaborator contract,
//! so CLI commands exercise exactly the code paths a host application
//! would.

use std::path::Path;

use autofocus_core::{
    ActivityInterval, ActivityState, ActivityTag, FocusSchedule, FocusSession,
    MemoryStore, Recurrence, ScheduleWithWorkflow, SmartSessionPreferences,
    ValidationError,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    intervals: Vec<IntervalDef>,
    #[serde(default)]
    schedules: Vec<ScheduleDef>,
    #[serde(default)]
    sessions: Vec<SessionDef>,
    #[serde(default)]
    preferences: Option<SmartSessionPreferences>,
    #[serde(default)]
    last_session_check: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct IntervalDef {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default = "default_state")]
    state: ActivityState,
    #[serde(default)]
    tags: Vec<String>,
}

fn default_state() -> ActivityState {
    ActivityState::Active
}

#[derive(Debug, Deserialize)]
struct ScheduleDef {
    id: String,
    #[serde(default)]
    label: Option<String>,
    workflow_id: String,
    workflow_name: String,
    scheduled_time: DateTime<Utc>,
    recurrence: RecurrenceDef,
    #[serde(default)]
    days_of_week: Vec<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RecurrenceDef {
    None,
    Daily,
    Weekly,
}

#[derive(Debug, Deserialize)]
struct SessionDef {
    /// Generated when omitted
    #[serde(default)]
    id: Option<String>,
    workflow_id: String,
    start: DateTime<Utc>,
    /// Missing end marks the session as in progress
    #[serde(default)]
    end: Option<DateTime<Utc>>,
}

impl Scenario {
    /// Parse a scenario file and materialize it as a memory store.
    pub fn load(path: &Path) -> Result<MemoryStore, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let scenario: Scenario = toml::from_str(&text)?;
        log::debug!(
            "loaded scenario from {}: {} interval(s), {} schedule(s), {} session(s)",
            path.display(),
            scenario.intervals.len(),
            scenario.schedules.len(),
            scenario.sessions.len()
        );
        scenario.into_store()
    }

    fn into_store(self) -> Result<MemoryStore, Box<dyn std::error::Error>> {
        let mut store = MemoryStore::new();

        for (i, def) in self.intervals.into_iter().enumerate() {
            if def.end < def.start {
                return Err(ValidationError::InvalidInterval {
                    start: def.start.to_rfc3339(),
                    end: def.end.to_rfc3339(),
                }
                .into());
            }
            store.intervals.push(ActivityInterval {
                start: def.start,
                end: def.end,
                state: def.state,
                tags: def
                    .tags
                    .iter()
                    .enumerate()
                    .map(|(j, name)| ActivityTag::new(format!("tag-{i}-{j}"), name))
                    .collect(),
            });
        }
        store.intervals.sort_by_key(|i| i.start);

        for def in self.schedules {
            let recurrence = match def.recurrence {
                RecurrenceDef::None => Recurrence::None,
                RecurrenceDef::Daily => Recurrence::Daily,
                RecurrenceDef::Weekly => Recurrence::Weekly {
                    days_of_week: def.days_of_week,
                },
            };
            let schedule = FocusSchedule::new(
                def.id,
                def.label,
                def.workflow_id,
                def.scheduled_time,
                recurrence,
            )?;
            store.schedules.push(ScheduleWithWorkflow {
                schedule,
                workflow_name: def.workflow_name,
            });
        }

        for def in self.sessions {
            let session = FocusSession {
                id: def
                    .id
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                workflow_id: def.workflow_id,
                start: def.start,
                end: def.end,
            };
            if session.completed() {
                store.completed.push(session);
            } else {
                store.in_progress = Some(session);
            }
        }

        if let Some(preferences) = self.preferences {
            store.preferences = preferences;
        }
        store.last_session_check = self.last_session_check;

        Ok(store)
    }
}
