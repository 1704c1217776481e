//! Pull request identification.
//!
//! A pull request is addressed by the (owner, repo, number) triple, built
//! either from discrete parts or from a canonical GitHub URL. Both forms
//! resolve to the same [`PullRequestRef`] before any network call.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pre-compiled pattern for canonical pull request URLs.
static PULL_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/\s]+)/([^/\s]+)/pull/(\d+)(?:[/?#].*)?$")
        .expect("pull URL pattern is valid")
});

/// Errors building a pull request reference.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// A triple component was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The URL does not match `https://github.com/{{owner}}/{{repo}}/pull/{{number}}`.
    #[error("not a pull request URL: {url}")]
    InvalidUrl { url: String },

    /// The pull request number in the URL overflows u64.
    #[error("pull request number out of range: {value}")]
    NumberOutOfRange { value: String },
}

/// The (owner, repo, number) triple identifying a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestRef {
    /// Builds a reference from discrete parts, rejecting empty components.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        number: u64,
    ) -> Result<Self, LocatorError> {
        let owner = owner.into();
        let repo = repo.into();
        if owner.is_empty() {
            return Err(LocatorError::Empty {
                field: "organization",
            });
        }
        if repo.is_empty() {
            return Err(LocatorError::Empty {
                field: "repository",
            });
        }
        Ok(Self {
            owner,
            repo,
            number,
        })
    }

    /// Parses a canonical pull request URL.
    ///
    /// Accepts http or https and tolerates a trailing path (e.g. `/files`)
    /// or query string after the number.
    pub fn from_url(url: &str) -> Result<Self, LocatorError> {
        let caps = PULL_URL_RE
            .captures(url.trim())
            .ok_or_else(|| LocatorError::InvalidUrl {
                url: url.to_string(),
            })?;

        let number: u64 = caps[3].parse().map_err(|_| LocatorError::NumberOutOfRange {
            value: caps[3].to_string(),
        })?;

        Self::new(&caps[1], &caps[2], number)
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl std::str::FromStr for PullRequestRef {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_url(s)
    }
}
