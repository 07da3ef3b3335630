//! Recurring focus-schedule definitions and next-occurrence computation.
//!
//! For recurring types only the time-of-day of `scheduled_time` matters;
//! the date it was created on is ignored. All calendar arithmetic is UTC.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How a schedule repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Recurrence {
    /// One-time: fires at the literal `scheduled_time`, never recurs
    None,
    /// Every day at the original time-of-day
    Daily,
    /// On the given weekdays (0=Sunday .. 6=Saturday) at the original
    /// time-of-day; non-empty by construction
    Weekly { days_of_week: Vec<u8> },
}

/// A persisted focus-session schedule, read-only to the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSchedule {
    pub id: String,
    pub label: Option<String>,
    pub workflow_id: String,
    pub scheduled_time: DateTime<Utc>,
    pub recurrence: Recurrence,
}

impl FocusSchedule {
    /// Build a schedule, rejecting weekly recurrences with no weekdays or
    /// out-of-range weekday indices.
    pub fn new(
        id: impl Into<String>,
        label: Option<String>,
        workflow_id: impl Into<String>,
        scheduled_time: DateTime<Utc>,
        recurrence: Recurrence,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if let Recurrence::Weekly { days_of_week } = &recurrence {
            if days_of_week.is_empty() {
                return Err(ValidationError::EmptyWeeklyDays { schedule_id: id });
            }
            if let Some(&day) = days_of_week.iter().find(|&&d| d > 6) {
                return Err(ValidationError::DayOutOfRange { day });
            }
        }
        Ok(Self {
            id,
            label,
            workflow_id: workflow_id.into(),
            scheduled_time,
            recurrence,
        })
    }

    /// The next instant this schedule should fire, strictly after `now`.
    ///
    /// One-time schedules return nothing once their instant is past. Weekly
    /// schedules search the current 7-day window first and wrap into the
    /// following week when every candidate this week is already behind us.
    pub fn next_occurrence(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match &self.recurrence {
            Recurrence::None => {
                (self.scheduled_time > now).then_some(self.scheduled_time)
            }
            Recurrence::Daily => {
                let today = self.at_time_of_day(now.date_naive());
                if today > now {
                    Some(today)
                } else {
                    Some(today + Duration::days(1))
                }
            }
            Recurrence::Weekly { days_of_week } => {
                for offset in 0..7 {
                    let date = now.date_naive() + Days::new(offset);
                    if !days_of_week.contains(&weekday_index(date)) {
                        continue;
                    }
                    let candidate = self.at_time_of_day(date);
                    if candidate > now {
                        return Some(candidate);
                    }
                }
                // Wrap into next week: first matching weekday wins
                // unconditionally.
                for offset in 7..14 {
                    let date = now.date_naive() + Days::new(offset);
                    if days_of_week.contains(&weekday_index(date)) {
                        return Some(self.at_time_of_day(date));
                    }
                }
                None
            }
        }
    }

    /// Given date at this schedule's original time-of-day.
    fn at_time_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_time(self.scheduled_time.time()).and_utc()
    }
}

/// Weekday as 0=Sunday .. 6=Saturday.
fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
