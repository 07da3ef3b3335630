//! Integration tests for the trigger decision flow.
//!
//! This test file verifies:
//! - The full poll path from interval store to verdict
//! - Cooldown interaction with the persisted check marker
//! - Graceful degradation when a store read fails

use autofocus_core::{
    ActivityInterval, ActivityState, ActivityTag, FocusSession, IntervalStore,
    MemoryStore, SmartSessionPreferences, StoreError, TriggerEngine, TriggerVerdict,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 14, 0, 0).unwrap()
}

fn minute_interval(minutes_ago: i64, tag: &str) -> ActivityInterval {
    let start = now() - Duration::minutes(minutes_ago);
    ActivityInterval {
        start,
        end: start + Duration::minutes(1),
        state: ActivityState::Active,
        tags: vec![ActivityTag::new(format!("tag-{minutes_ago}"), tag)],
    }
}

fn scenario(window_tag: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.completed = vec![FocusSession {
        id: "sess-1".to_string(),
        workflow_id: "wf-1".to_string(),
        start: now() - Duration::hours(3),
        end: Some(now() - Duration::hours(2)),
    }];
    for minutes_ago in 1..=30 {
        store.intervals.push(minute_interval(minutes_ago, window_tag));
    }
    store
}

#[test]
fn test_full_doomscroll_flow() {
    let store = scenario("consuming");
    let engine = TriggerEngine::new();
    assert_eq!(
        engine.evaluate(&store, &store, &store, now()),
        TriggerVerdict::Doomscroll
    );
}

#[test]
fn test_full_smart_flow() {
    let store = scenario("creating");
    let engine = TriggerEngine::new();
    assert_eq!(
        engine.evaluate(&store, &store, &store, now()),
        TriggerVerdict::Smart
    );
}

#[test]
fn test_recorded_check_suppresses_next_poll() {
    let mut store = scenario("consuming");
    let engine = TriggerEngine::new();

    assert_eq!(
        engine.evaluate(&store, &store, &store, now()),
        TriggerVerdict::Doomscroll
    );

    // Caller records the check; a poll 20 minutes later is inside the
    // check cooldown even though the session is hours old.
    engine.record_check(&mut store, now()).unwrap();
    let later = now() + Duration::minutes(20);
    assert_eq!(
        engine.evaluate(&store, &store, &store, later),
        TriggerVerdict::None
    );

    // 31 minutes after the check the gate reopens, but the activity
    // window has moved past the data, so the coverage guard holds.
    let much_later = now() + Duration::minutes(31);
    assert_eq!(
        engine.evaluate(&store, &store, &store, much_later),
        TriggerVerdict::None
    );
}

#[test]
fn test_neutral_activity_triggers_nothing() {
    let store = scenario("neutral");
    let engine = TriggerEngine::new();
    assert_eq!(
        engine.evaluate(&store, &store, &store, now()),
        TriggerVerdict::None
    );
}

/// Store whose interval reads always fail.
struct FailingIntervals;

impl IntervalStore for FailingIntervals {
    fn fetch_range(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<ActivityInterval>, StoreError> {
        Err(StoreError::Unavailable("interval backend down".to_string()))
    }
}

#[test]
fn test_store_failure_degrades_to_none() {
    let store = scenario("consuming");
    let engine = TriggerEngine::new();
    assert_eq!(
        engine.evaluate(&store, &FailingIntervals, &store, now()),
        TriggerVerdict::None
    );
}

#[test]
fn test_preferences_window_lengths_are_respected() {
    // Consuming only covers the default 10-minute trigger window; with a
    // shortened doomscroll window it flips from none to doomscroll.
    let mut store = MemoryStore::new();
    store.completed = vec![FocusSession {
        id: "sess-1".to_string(),
        workflow_id: "wf-1".to_string(),
        start: now() - Duration::hours(3),
        end: Some(now() - Duration::hours(2)),
    }];
    for minutes_ago in 1..=10 {
        store.intervals.push(minute_interval(minutes_ago, "consuming"));
    }

    let engine = TriggerEngine::new();
    assert_eq!(
        engine.evaluate(&store, &store, &store, now()),
        TriggerVerdict::None
    );

    store.preferences = SmartSessionPreferences {
        enabled: true,
        doomscroll_duration_minutes: 10,
        trigger_duration_minutes: 10,
    };
    assert_eq!(
        engine.evaluate(&store, &store, &store, now()),
        TriggerVerdict::Doomscroll
    );
}
