//! Active-time estimation from commit timestamps.
//!
//! # Algorithm Summary
//!
//! 1. Sort timestamps ascending (API return order is not chronological)
//! 2. Compute the gap in whole seconds between each commit and its
//!    predecessor; the first commit gets a gap of 0
//! 3. Cluster the gap values with 1-D DBSCAN (gaps of similar magnitude
//!    belong to the same work rhythm)
//! 4. Sum each cluster, discard clusters at or below the noise floor,
//!    and convert the remaining seconds to hours

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cluster;
use crate::commit::Commit;

/// Configuration for the estimator.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// DBSCAN neighborhood radius over gap values, in seconds.
    /// Default: 3600 (1 hour).
    pub neighborhood_secs: i64,

    /// Minimum neighbor count (self included) for a DBSCAN core point.
    /// Default: 1, which makes every gap a core point — an isolated
    /// overnight gap becomes its own single-point cluster and, if it clears
    /// the noise floor, counts as active time. Set this to 2 or more to
    /// classify isolated gaps as noise instead.
    pub min_cluster_size: usize,

    /// Clusters summing to no more than this many seconds are discarded
    /// before aggregation. Default: 1800 (30 minutes).
    pub noise_floor_secs: i64,

    /// When false, every cluster is summed regardless of the noise floor.
    /// Matches an earlier revision of the tool; kept for comparison only.
    pub filter_short_sessions: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            neighborhood_secs: 3600,
            min_cluster_size: 1,
            noise_floor_secs: 1800,
            filter_short_sessions: true,
        }
    }
}

/// One clustered candidate work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Indices into the gap list (aligned with the sorted commit list).
    pub gap_indices: Vec<usize>,

    /// Summed gap seconds of the cluster's members.
    pub total_secs: i64,
}

/// Result of one estimation run.
///
/// Everything beyond `hours` is diagnostic: it explains how the estimate
/// was reached but never feeds back into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Estimated active hours (unrounded).
    pub hours: f64,

    /// Total seconds across surviving sessions.
    pub active_secs: i64,

    /// Gap list in sorted-commit order; index 0 is always 0.
    pub gap_secs: Vec<i64>,

    /// Clusters that survived the noise floor.
    pub sessions: Vec<SessionSummary>,

    /// Clusters discarded by the noise floor.
    pub discarded: Vec<SessionSummary>,

    /// Gap indices DBSCAN classified as noise points.
    pub noise_gaps: Vec<usize>,
}

/// Estimate the active hours behind a list of commits.
///
/// Pure and total: input order is irrelevant, duplicates are legal, and an
/// empty list estimates zero hours rather than failing. Timestamps are
/// assumed valid instants; parse failures belong to the boundary that
/// built the [`Commit`] records.
#[expect(
    clippy::cast_precision_loss,
    reason = "active seconds are far below 2^52"
)]
#[must_use]
pub fn estimate_active_hours(commits: &[Commit], config: &EstimatorConfig) -> Estimate {
    let mut timestamps: Vec<DateTime<Utc>> = commits.iter().map(|c| c.timestamp).collect();
    timestamps.sort_unstable();

    let gap_secs: Vec<i64> = timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            if i == 0 {
                0
            } else {
                (*ts - timestamps[i - 1]).num_seconds()
            }
        })
        .collect();

    let clustering = cluster::dbscan(&gap_secs, config.neighborhood_secs, config.min_cluster_size);

    let mut sessions = Vec::new();
    let mut discarded = Vec::new();
    for gap_indices in clustering.clusters {
        let total_secs = gap_indices.iter().map(|&i| gap_secs[i]).sum();
        let summary = SessionSummary {
            gap_indices,
            total_secs,
        };
        if !config.filter_short_sessions || total_secs > config.noise_floor_secs {
            sessions.push(summary);
        } else {
            discarded.push(summary);
        }
    }

    let active_secs: i64 = sessions.iter().map(|s| s.total_secs).sum();
    let hours = active_secs as f64 / 3600.0;

    tracing::debug!(
        commits = commits.len(),
        sessions = sessions.len(),
        discarded = discarded.len(),
        noise = clustering.noise.len(),
        active_secs,
        "estimated active time"
    );

    Estimate {
        hours,
        active_secs,
        gap_secs,
        sessions,
        discarded,
        noise_gaps: clustering.noise,
    }
}

/// Round an hours value to the nearest half hour.
///
/// Note the formula rounds down for values like 6.24 (12.48 → 12 → 6.0);
/// only 6.25 and above reach 6.5.
#[must_use]
pub fn round_to_half_hour(hours: f64) -> f64 {
    (hours * 2.0).round() / 2.0
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "expected values are exactly representable"
)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn commits_at(offsets_secs: &[i64]) -> Vec<Commit> {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        offsets_secs
            .iter()
            .enumerate()
            .map(|(i, &secs)| Commit::new(format!("sha-{i}"), base + Duration::seconds(secs)))
            .collect()
    }

    fn estimate(offsets_secs: &[i64]) -> Estimate {
        estimate_active_hours(&commits_at(offsets_secs), &EstimatorConfig::default())
    }

    /// 2 hours of commits every minute, then one commit 5 hours later.
    fn dense_session_offsets() -> Vec<i64> {
        let mut offsets: Vec<i64> = (0..=120).map(|i| i * 60).collect();
        offsets.push(7200 + 18_000);
        offsets
    }

    #[test]
    fn empty_input_is_zero_hours() {
        let result = estimate(&[]);
        assert_eq!(result.hours, 0.0);
        assert_eq!(result.active_secs, 0);
        assert!(result.gap_secs.is_empty());
        assert!(result.sessions.is_empty());
    }

    #[test]
    fn single_commit_is_zero_hours() {
        let result = estimate(&[0]);
        assert_eq!(result.hours, 0.0);
        assert_eq!(result.gap_secs, vec![0]);
    }

    #[test]
    fn duplicate_timestamps_are_zero_hours() {
        let result = estimate(&[0, 0, 0]);
        assert_eq!(result.hours, 0.0);
        assert_eq!(result.gap_secs, vec![0, 0, 0]);
    }

    #[test]
    fn short_bursts_are_filtered_to_zero() {
        // Gaps [0, 10, 10] form one cluster summing 20s, below the floor.
        let result = estimate(&[0, 10, 20]);
        assert_eq!(result.hours, 0.0);
        assert!(result.sessions.is_empty());
        assert_eq!(result.discarded.len(), 1);
        assert_eq!(result.discarded[0].total_secs, 20);
    }

    #[test]
    fn first_gap_is_always_zero() {
        let result = estimate(&[500, 4000, 10_000]);
        assert_eq!(result.gap_secs[0], 0);
        assert_eq!(result.gap_secs.len(), 3);
    }

    #[test]
    fn input_order_does_not_matter() {
        let chronological = estimate(&[0, 300, 3600, 7200]);
        let shuffled = estimate(&[7200, 0, 3600, 300]);
        assert_eq!(chronological, shuffled);
        assert_eq!(chronological.hours, 2.0);
    }

    #[test]
    fn repeated_calls_agree() {
        let commits = commits_at(&dense_session_offsets());
        let config = EstimatorConfig::default();
        let first = estimate_active_hours(&commits, &config);
        let second = estimate_active_hours(&commits, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn dense_session_plus_overnight_gap() {
        // The minute-spaced gaps chain into one 7200s cluster; the 18000s
        // gap is its own single-point cluster. Both clear the floor, so
        // the isolated gap counts as active time under min_cluster_size=1.
        let result = estimate(&dense_session_offsets());
        assert_eq!(result.sessions.len(), 2);
        assert_eq!(result.active_secs, 25_200);
        assert_eq!(result.hours, 7.0);
        assert_eq!(round_to_half_hour(result.hours), 7.0);
        assert!(result.noise_gaps.is_empty());
    }

    #[test]
    fn min_cluster_size_two_drops_isolated_gap() {
        let config = EstimatorConfig {
            min_cluster_size: 2,
            ..EstimatorConfig::default()
        };
        let result = estimate_active_hours(&commits_at(&dense_session_offsets()), &config);
        assert_eq!(result.hours, 2.0);
        assert_eq!(result.noise_gaps.len(), 1);
    }

    #[test]
    fn unfiltered_variant_counts_short_clusters() {
        let config = EstimatorConfig {
            filter_short_sessions: false,
            ..EstimatorConfig::default()
        };
        let result = estimate_active_hours(&commits_at(&[0, 10, 20]), &config);
        assert_eq!(result.active_secs, 20);
        assert!(result.discarded.is_empty());
        assert_eq!(result.hours, 20.0 / 3600.0);
    }

    #[test]
    fn cluster_exactly_at_floor_is_discarded() {
        // The floor check is strictly-greater-than: 1800s does not survive.
        let result = estimate(&[0, 1800]);
        assert_eq!(result.hours, 0.0);
        assert_eq!(result.discarded.len(), 1);
        assert_eq!(result.discarded[0].total_secs, 1800);
    }

    #[test]
    fn half_hour_rounding_follows_the_formula() {
        // round(6.24 * 2) / 2 = round(12.48) / 2 = 12 / 2 = 6.0
        assert_eq!(round_to_half_hour(6.24), 6.0);
        assert_eq!(round_to_half_hour(6.26), 6.5);
        assert_eq!(round_to_half_hour(0.24), 0.0);
        assert_eq!(round_to_half_hour(0.26), 0.5);
        assert_eq!(round_to_half_hour(7.0), 7.0);
    }

    #[test]
    fn estimate_serializes_for_json_output() {
        let result = estimate(&[0, 300, 3600, 7200]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["active_secs"], 7200);
        assert_eq!(json["hours"], 2.0);
    }
}
