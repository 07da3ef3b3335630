//! # Autofocus Core Library
//!
//! This library provides the decision core for Autofocus: it classifies the
//! user's tagged activity timeline into semantic buckets and decides when a
//! focus session should be suggested or auto-started.
//!
//! ## Architecture
//!
//! - **Aggregator**: Converts tagged activity intervals into fixed-width
//!   hourly or daily buckets with per-tag minute totals
//! - **Classifier**: Computes dominant-tag verdicts over rolling windows
//! - **Trigger Engine**: Combines classification with session and cooldown
//!   state to produce a smart-session or doomscroll verdict
//! - **Schedule Evaluator**: Computes next occurrences for recurring
//!   schedules and emits deduplicated reminder/start actions per poll
//!
//! Everything is single-threaded and poll-driven: the caller owns the timer
//! and the stores, and every time-dependent operation takes `now`
//! explicitly. The core never starts a session or shows UI itself; verdicts
//! and actions are handed to caller-owned collaborators.
//!
//! ## Key Components
//!
//! - [`hourly_graph`] / [`daily_graph`]: Graph-ready bucket views
//! - [`TriggerEngine`]: Session-trigger state machine
//! - [`ScheduleEvaluator`]: Schedule poll cycle with per-occurrence dedup
//! - [`MemoryStore`]: In-memory collaborator double for tests and demos

pub mod activity;
pub mod buckets;
pub mod classifier;
pub mod error;
pub mod evaluator;
pub mod schedule;
pub mod store;
pub mod trigger;

pub use activity::{ActivityInterval, ActivityState, ActivityTag, TagKind};
pub use buckets::{
    daily_graph, hourly_buckets, hourly_graph, GraphableBucket, TimeBucket,
    HOURS_PER_DAY, IDLE_NOISE_FLOOR_MINUTES,
};
pub use classifier::{is_dominant, DOMINANCE_THRESHOLD};
pub use error::{CoreError, StoreError, ValidationError};
pub use evaluator::{ScheduleAction, ScheduledOccurrence, ScheduleEvaluator};
pub use schedule::{FocusSchedule, Recurrence};
pub use store::{
    CheckpointStore, FocusSession, IntervalStore, MemoryStore, ScheduleStore,
    ScheduleWithWorkflow, SessionStore, SmartSessionPreferences,
};
pub use trigger::{TriggerEngine, TriggerVerdict, COOLDOWN_MINUTES};
