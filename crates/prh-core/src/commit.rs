//! The commit record consumed by the estimator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit, reduced to the fields the estimator needs.
///
/// The upstream API returns a much richer shape; the collaborator maps it
/// into this record at the boundary so the core only ever sees a typed,
/// timezone-normalized instant. The sha is opaque to the algorithm and kept
/// only for traceability in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    #[must_use]
    pub fn new(sha: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sha: sha.into(),
            timestamp,
        }
    }
}
