use std::path::PathBuf;

use autofocus_core::{TriggerEngine, TriggerVerdict};
use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::scenario::Scenario;

#[derive(Subcommand)]
pub enum TriggerAction {
    /// Evaluate the trigger state machine once
    Check {
        /// Scenario TOML file
        #[arg(long)]
        scenario: PathBuf,
        /// Evaluation instant (RFC 3339)
        #[arg(long)]
        now: DateTime<Utc>,
        /// Record a trigger check after evaluating
        #[arg(long)]
        record: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TriggerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TriggerAction::Check {
            scenario,
            now,
            record,
            json,
        } => {
            let mut store = Scenario::load(&scenario)?;
            let engine = TriggerEngine::new();
            let verdict = engine.evaluate(&store, &store, &store, now);

            if record {
                engine.record_check(&mut store, now)?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                match verdict {
                    TriggerVerdict::None => println!("verdict: none"),
                    TriggerVerdict::Doomscroll => {
                        println!("verdict: doomscroll (consuming dominated the window)")
                    }
                    TriggerVerdict::Smart => {
                        println!("verdict: smart (creating dominated the window)")
                    }
                }
                if record {
                    println!("check recorded at {}", now.to_rfc3339());
                }
            }
        }
    }
    Ok(())
}
