use std::path::PathBuf;

use autofocus_core::{daily_graph, hourly_graph, GraphableBucket, IntervalStore};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::Subcommand;

use crate::scenario::Scenario;

#[derive(Subcommand)]
pub enum GraphAction {
    /// Hourly buckets for one UTC day
    Hourly {
        /// Scenario TOML file
        #[arg(long)]
        scenario: PathBuf,
        /// Day to graph (UTC), e.g. 2026-08-24
        #[arg(long)]
        date: NaiveDate,
        /// Evaluation instant (RFC 3339)
        #[arg(long)]
        now: DateTime<Utc>,
        /// Zero the idle line item
        #[arg(long)]
        hide_idle: bool,
        /// Emit pretty JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Daily buckets over a range of UTC days
    Daily {
        #[arg(long)]
        scenario: PathBuf,
        /// First day of the range (UTC)
        #[arg(long)]
        start: NaiveDate,
        /// Number of days
        #[arg(long, default_value_t = 7)]
        days: usize,
        #[arg(long)]
        now: DateTime<Utc>,
        #[arg(long)]
        hide_idle: bool,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GraphAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GraphAction::Hourly {
            scenario,
            date,
            now,
            hide_idle,
            json,
        } => {
            let store = Scenario::load(&scenario)?;
            let day_start = date.and_time(NaiveTime::MIN).and_utc();
            let intervals = store.fetch_range(day_start, day_start + Duration::days(1))?;
            let graph = hourly_graph(day_start, &intervals, now, !hide_idle);
            print_graph(&graph, 60.0, json)?;
        }
        GraphAction::Daily {
            scenario,
            start,
            days,
            now,
            hide_idle,
            json,
        } => {
            let store = Scenario::load(&scenario)?;
            let range_start = start.and_time(NaiveTime::MIN).and_utc();
            let intervals =
                store.fetch_range(range_start, range_start + Duration::days(days as i64))?;
            let graph = daily_graph(range_start, days, &intervals, now, !hide_idle);
            print_graph(&graph, 24.0 * 60.0, json)?;
        }
    }
    Ok(())
}

fn print_graph(
    graph: &[GraphableBucket],
    slot_minutes: f64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(graph)?);
        return Ok(());
    }

    // One character per ~1/30th of the slot.
    let per_char = slot_minutes / 30.0;
    println!(
        "{:<10} {:>8} {:>9} {:>8} {:>6} {:>8}  activity",
        "slot", "creating", "consuming", "neutral", "idle", "offline"
    );
    for bucket in graph {
        let bar: String = [
            (bucket.creating, '█'),
            (bucket.consuming, '▓'),
            (bucket.neutral, '▒'),
            (bucket.idle, '░'),
        ]
        .iter()
        .map(|(minutes, ch)| {
            let chars = (minutes / per_char).round() as usize;
            ch.to_string().repeat(chars)
        })
        .collect();

        println!(
            "{:<10} {:>8.1} {:>9.1} {:>8.1} {:>6.1} {:>8.1}  {}",
            bucket.label,
            bucket.creating,
            bucket.consuming,
            bucket.neutral,
            bucket.idle,
            bucket.offline,
            bar
        );
    }
    println!();
    println!("Legend: █ creating ▓ consuming ▒ neutral ░ idle");
    Ok(())
}
