//! Activity timeline data model.
//!
//! Intervals are produced by an external activity monitor and are read-only
//! to this library. Tag names are open-ended, but the four canonical
//! semantic buckets (creating / consuming / neutral / idle) get their own
//! enum variants so classification never rests on string comparison at the
//! call sites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the user was interacting with the machine over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    Active,
    Inactive,
}

/// Semantic bucket a tag belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Creating,
    Consuming,
    Neutral,
    Idle,
    /// User-defined tag outside the canonical set
    Other(String),
}

impl TagKind {
    /// Map a raw tag name onto its semantic bucket.
    pub fn from_name(name: &str) -> Self {
        match name {
            "creating" => TagKind::Creating,
            "consuming" => TagKind::Consuming,
            "neutral" => TagKind::Neutral,
            "idle" => TagKind::Idle,
            other => TagKind::Other(other.to_string()),
        }
    }

    /// The tag name as stored by the activity monitor.
    pub fn name(&self) -> &str {
        match self {
            TagKind::Creating => "creating",
            TagKind::Consuming => "consuming",
            TagKind::Neutral => "neutral",
            TagKind::Idle => "idle",
            TagKind::Other(name) => name,
        }
    }
}

/// A tag attached to an activity interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTag {
    pub id: String,
    pub kind: TagKind,
}

impl ActivityTag {
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        Self {
            id: id.into(),
            kind: TagKind::from_name(name),
        }
    }
}

/// One tagged slice of the activity timeline, `end >= start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub state: ActivityState,
    /// Zero or more tags; duration is split evenly across them
    pub tags: Vec<ActivityTag>,
}

impl ActivityInterval {
    /// Interval length in fractional minutes.
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_seconds().max(0) as f64 / 60.0
    }

    /// True if `[start, end)` overlaps the given range.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, h, m, 0).unwrap()
    }

    #[test]
    fn test_tag_kind_from_name() {
        assert_eq!(TagKind::from_name("creating"), TagKind::Creating);
        assert_eq!(TagKind::from_name("idle"), TagKind::Idle);
        assert_eq!(
            TagKind::from_name("deep-work"),
            TagKind::Other("deep-work".to_string())
        );
    }

    #[test]
    fn test_tag_kind_name_round_trip() {
        for name in ["creating", "consuming", "neutral", "idle", "music"] {
            assert_eq!(TagKind::from_name(name).name(), name);
        }
    }

    #[test]
    fn test_duration_minutes() {
        let interval = ActivityInterval {
            start: ts(9, 0),
            end: ts(9, 30),
            state: ActivityState::Active,
            tags: vec![],
        };
        assert_eq!(interval.duration_minutes(), 30.0);
    }

    #[test]
    fn test_overlaps_half_open() {
        let interval = ActivityInterval {
            start: ts(9, 0),
            end: ts(10, 0),
            state: ActivityState::Active,
            tags: vec![],
        };
        assert!(interval.overlaps(ts(9, 30), ts(11, 0)));
        // Touching at the boundary does not overlap
        assert!(!interval.overlaps(ts(10, 0), ts(11, 0)));
    }
}
