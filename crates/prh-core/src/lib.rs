//! Core estimation logic for PR active hours.
//!
//! Converts the commit timestamps of a single pull request into an
//! estimate of continuous working time:
//! - Gap computation: seconds between chronologically adjacent commits
//! - Clustering: density-based grouping of gap magnitudes
//! - Aggregation: noise filtering and summation into active hours

pub mod cluster;
mod commit;
mod estimate;

pub use cluster::{Clustering, dbscan};
pub use commit::Commit;
pub use estimate::{
    Estimate, EstimatorConfig, SessionSummary, estimate_active_hours, round_to_half_hour,
};
