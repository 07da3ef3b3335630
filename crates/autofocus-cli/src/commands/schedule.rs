use std::path::PathBuf;

use autofocus_core::{ScheduleAction, ScheduleEvaluator, ScheduleStore};
use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;

use crate::scenario::Scenario;

#[derive(Subcommand)]
pub enum ScheduleCmd {
    /// List active schedules
    List {
        /// Scenario TOML file
        #[arg(long)]
        scenario: PathBuf,
        /// Emit pretty JSON
        #[arg(long)]
        json: bool,
    },
    /// Next occurrence per schedule
    Next {
        #[arg(long)]
        scenario: PathBuf,
        /// Evaluation instant (RFC 3339)
        #[arg(long)]
        now: DateTime<Utc>,
    },
    /// Run minute-cadence polls over a window, printing actions
    Poll {
        #[arg(long)]
        scenario: PathBuf,
        /// First poll instant (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,
        /// Number of one-minute ticks
        #[arg(long, default_value_t = 60)]
        minutes: u32,
    },
}

pub fn run(action: ScheduleCmd) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleCmd::List { scenario, json } => {
            let store = Scenario::load(&scenario)?;
            let schedules = store.active_schedules()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schedules)?);
            } else {
                for entry in schedules {
                    println!(
                        "{}  {}  ({})",
                        entry.schedule.id,
                        entry.schedule.label.as_deref().unwrap_or("-"),
                        entry.workflow_name
                    );
                }
            }
        }
        ScheduleCmd::Next { scenario, now } => {
            let store = Scenario::load(&scenario)?;
            for entry in store.active_schedules()? {
                match entry.schedule.next_occurrence(now) {
                    Some(occurrence) => println!(
                        "{}  next: {}",
                        entry.schedule.id,
                        occurrence.to_rfc3339()
                    ),
                    None => println!("{}  next: never", entry.schedule.id),
                }
            }
        }
        ScheduleCmd::Poll {
            scenario,
            from,
            minutes,
        } => {
            let store = Scenario::load(&scenario)?;
            let mut evaluator = ScheduleEvaluator::new();
            let mut fired = 0u32;
            for tick in 0..minutes {
                let now = from + Duration::minutes(tick as i64);
                match evaluator.poll(&store, now) {
                    ScheduleAction::Reminder(occ) => {
                        fired += 1;
                        println!(
                            "{}  reminder  {} ({}) at {}",
                            now.to_rfc3339(),
                            occ.schedule.id,
                            occ.workflow_name,
                            occ.occurrence.to_rfc3339()
                        );
                    }
                    ScheduleAction::Start(occ) => {
                        fired += 1;
                        println!(
                            "{}  start     {} ({}) at {}",
                            now.to_rfc3339(),
                            occ.schedule.id,
                            occ.workflow_name,
                            occ.occurrence.to_rfc3339()
                        );
                    }
                    ScheduleAction::None => {}
                }
            }
            evaluator.cleanup(from + Duration::minutes(minutes as i64));
            println!(
                "{} action(s) over {} tick(s); {} dedup key(s) retained",
                fired,
                minutes,
                evaluator.tracked_key_count()
            );
        }
    }
    Ok(())
}
