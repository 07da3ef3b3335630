//! Dominant-tag classification over a rolling window.
//!
//! The ratio is tag-count based, not duration-weighted: an interval with
//! three tags contributes three occurrences regardless of how long it ran.
//! That is a deliberate, cheap proxy with known skew; downstream thresholds
//! were tuned against it and it must not be silently changed to a
//! duration-weighted ratio.

use chrono::{DateTime, Utc};

use crate::activity::{ActivityInterval, TagKind};

/// A tag must account for at least this share of occurrences to dominate.
pub const DOMINANCE_THRESHOLD: f64 = 0.75;

/// Whether `target` dominates the tag occurrences within the window.
///
/// Returns `false` outright when the fetched intervals cover strictly less
/// time than the window itself: sparse or missing data must never produce a
/// positive verdict.
pub fn is_dominant(
    intervals: &[ActivityInterval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    target: &TagKind,
) -> bool {
    let window_secs = (window_end - window_start).num_seconds();
    let covered_secs: i64 = intervals
        .iter()
        .map(|i| (i.end - i.start).num_seconds().max(0))
        .sum();
    if covered_secs < window_secs {
        return false;
    }

    let total = intervals.iter().map(|i| i.tags.len()).sum::<usize>();
    if total == 0 {
        return false;
    }
    let matching = intervals
        .iter()
        .flat_map(|i| i.tags.iter())
        .filter(|t| t.kind == *target)
        .count();

    matching as f64 / total as f64 >= DOMINANCE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityState, ActivityTag};
    use chrono::{Duration, TimeZone};

    fn window_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 9, 0, 0).unwrap()
    }

    fn interval(offset_min: i64, duration_min: i64, tags: &[&str]) -> ActivityInterval {
        let start = window_start() + Duration::minutes(offset_min);
        ActivityInterval {
            start,
            end: start + Duration::minutes(duration_min),
            state: ActivityState::Active,
            tags: tags
                .iter()
                .enumerate()
                .map(|(i, name)| ActivityTag::new(format!("tag-{i}"), name))
                .collect(),
        }
    }

    fn window_end() -> DateTime<Utc> {
        window_start() + Duration::minutes(10)
    }

    #[test]
    fn test_three_of_four_occurrences_dominates() {
        let intervals = vec![
            interval(0, 5, &["creating", "creating"]),
            interval(5, 5, &["creating", "neutral"]),
        ];
        assert!(is_dominant(
            &intervals,
            window_start(),
            window_end(),
            &TagKind::Creating
        ));
    }

    #[test]
    fn test_two_of_four_occurrences_does_not_dominate() {
        let intervals = vec![
            interval(0, 5, &["creating", "neutral"]),
            interval(5, 5, &["creating", "consuming"]),
        ];
        assert!(!is_dominant(
            &intervals,
            window_start(),
            window_end(),
            &TagKind::Creating
        ));
    }

    #[test]
    fn test_no_tags_is_never_dominant() {
        let intervals = vec![interval(0, 5, &[]), interval(5, 5, &[])];
        assert!(!is_dominant(
            &intervals,
            window_start(),
            window_end(),
            &TagKind::Creating
        ));
    }

    #[test]
    fn test_sparse_coverage_fails_regardless_of_ratio() {
        // 100% creating, but only half the window is covered
        let intervals = vec![interval(0, 5, &["creating"])];
        assert!(!is_dominant(
            &intervals,
            window_start(),
            window_end(),
            &TagKind::Creating
        ));
    }

    #[test]
    fn test_empty_window_is_never_dominant() {
        assert!(!is_dominant(
            &[],
            window_start(),
            window_end(),
            &TagKind::Consuming
        ));
    }

    #[test]
    fn test_ratio_is_count_based_not_duration_weighted() {
        // One long consuming interval, three short multi-tag ones: duration
        // says consuming, occurrence count says otherwise.
        let intervals = vec![
            interval(0, 9, &["consuming"]),
            interval(9, 1, &["creating", "neutral", "idle"]),
        ];
        assert!(!is_dominant(
            &intervals,
            window_start(),
            window_end(),
            &TagKind::Consuming
        ));
    }
}
