//! Time-bucket aggregation over the activity timeline.
//!
//! Converts tagged activity intervals into fixed-width buckets (hour of day
//! or calendar day) with per-tag minute totals, plus a graph-ready view that
//! rolls the canonical tags up into creating / consuming / neutral / idle /
//! offline line items.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityInterval, TagKind};

/// Hourly slots per day.
pub const HOURS_PER_DAY: usize = 24;

/// Minutes in one calendar-day slot.
pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Idle-only totals below this are treated as measurement noise.
pub const IDLE_NOISE_FLOOR_MINUTES: f64 = 2.0;

/// One fixed time slot with per-tag minute totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBucket {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Minutes attributed to each tag name within this slot
    pub tag_minutes: BTreeMap<String, f64>,
}

impl TimeBucket {
    fn empty(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            tag_minutes: BTreeMap::new(),
        }
    }

    /// Minutes for a tag name, zero when absent.
    pub fn minutes_for(&self, name: &str) -> f64 {
        self.tag_minutes.get(name).copied().unwrap_or(0.0)
    }

    /// Total minutes across all tags in this slot.
    pub fn total_minutes(&self) -> f64 {
        self.tag_minutes.values().sum()
    }
}

/// Graph-ready view of one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphableBucket {
    /// Display label ("09:00" for hours, "Mon 08/24" for days)
    pub label: String,
    pub creating: f64,
    pub consuming: f64,
    pub neutral: f64,
    pub idle: f64,
    pub offline: f64,
}

impl GraphableBucket {
    /// Minutes with any tracked activity, idle included.
    pub fn tracked(&self) -> f64 {
        self.creating + self.consuming + self.neutral + self.idle
    }
}

/// Accumulate intervals into `count` uniform slots starting at `range_start`.
///
/// An interval lands wholly in the slot containing its start; its duration is
/// split evenly across however many tags it carries. Untagged intervals
/// contribute nothing. Intervals starting outside the range are skipped.
fn build_buckets(
    range_start: DateTime<Utc>,
    slot_minutes: i64,
    count: usize,
    intervals: &[ActivityInterval],
) -> Vec<TimeBucket> {
    let slot = Duration::minutes(slot_minutes);
    let mut buckets: Vec<TimeBucket> = (0..count)
        .map(|i| {
            let start = range_start + slot * i as i32;
            TimeBucket::empty(start, start + slot)
        })
        .collect();

    for interval in intervals {
        if interval.tags.is_empty() {
            continue;
        }
        let offset_secs = (interval.start - range_start).num_seconds();
        if offset_secs < 0 {
            continue;
        }
        let idx = (offset_secs / (slot_minutes * 60)) as usize;
        if idx >= buckets.len() {
            continue;
        }

        let share = interval.duration_minutes() / interval.tags.len() as f64;
        for tag in &interval.tags {
            *buckets[idx]
                .tag_minutes
                .entry(tag.kind.name().to_string())
                .or_insert(0.0) += share;
        }
    }

    for bucket in &mut buckets {
        suppress_idle_noise(bucket);
    }

    buckets
}

/// Zero out idle when it is the only non-zero tag in the slot and stays
/// under the noise floor. The residual becomes offline rather than idle.
fn suppress_idle_noise(bucket: &mut TimeBucket) {
    let idle = bucket.minutes_for(TagKind::Idle.name());
    if idle > 0.0
        && idle < IDLE_NOISE_FLOOR_MINUTES
        && bucket
            .tag_minutes
            .iter()
            .all(|(name, minutes)| name.as_str() == TagKind::Idle.name() || *minutes == 0.0)
    {
        bucket.tag_minutes.remove(TagKind::Idle.name());
    }
}

/// Hourly tag-minute buckets for the day starting at `day_start`.
///
/// Always returns exactly 24 buckets; an empty interval list yields all-zero
/// slots.
pub fn hourly_buckets(
    day_start: DateTime<Utc>,
    intervals: &[ActivityInterval],
) -> Vec<TimeBucket> {
    build_buckets(day_start, 60, HOURS_PER_DAY, intervals)
}

fn graphable(bucket: &TimeBucket, now: DateTime<Utc>, label: String, show_idle: bool) -> GraphableBucket {
    let creating = bucket.minutes_for(TagKind::Creating.name());
    let consuming = bucket.minutes_for(TagKind::Consuming.name());
    let neutral = bucket.minutes_for(TagKind::Neutral.name());
    let idle = bucket.minutes_for(TagKind::Idle.name());

    let slot_minutes = (bucket.end - bucket.start).num_seconds() as f64 / 60.0;
    let offline = if now >= bucket.start && now < bucket.end {
        // Slot containing "now": only the elapsed part of the slot can be
        // offline, and idle does not count against it.
        let elapsed = (now - bucket.start).num_seconds() as f64 / 60.0;
        (elapsed - (creating + consuming + neutral)).max(0.0)
    } else {
        (slot_minutes - (creating + consuming + neutral + idle)).max(0.0)
    };

    GraphableBucket {
        label,
        creating,
        consuming,
        neutral,
        idle: if show_idle { idle } else { 0.0 },
        offline,
    }
}

/// Graph-ready hourly view of the day starting at `day_start`.
///
/// `show_idle = false` zeroes the idle line item without touching the other
/// values (offline is computed before the toggle applies).
pub fn hourly_graph(
    day_start: DateTime<Utc>,
    intervals: &[ActivityInterval],
    now: DateTime<Utc>,
    show_idle: bool,
) -> Vec<GraphableBucket> {
    hourly_buckets(day_start, intervals)
        .iter()
        .enumerate()
        .map(|(hour, bucket)| graphable(bucket, now, format!("{hour:02}:00"), show_idle))
        .collect()
}

/// Graph-ready daily view covering `num_days` calendar days from
/// `range_start` (expected to be a UTC midnight).
pub fn daily_graph(
    range_start: DateTime<Utc>,
    num_days: usize,
    intervals: &[ActivityInterval],
    now: DateTime<Utc>,
    show_idle: bool,
) -> Vec<GraphableBucket> {
    build_buckets(range_start, 24 * 60, num_days, intervals)
        .iter()
        .map(|bucket| {
            let label = bucket.start.format("%a %m/%d").to_string();
            graphable(bucket, now, label, show_idle)
        })
        .collect()
}
