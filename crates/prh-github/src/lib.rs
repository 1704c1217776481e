//! GitHub API integration for the PR hours estimator.
//!
//! Fetches the commit list of a pull request and maps the dynamic API
//! payload into the minimal [`Commit`] record at the boundary, so the
//! estimator only ever sees typed, timezone-normalized instants.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use prh_core::Commit;
use serde::Deserialize;
use thiserror::Error;

mod locator;

pub use locator::{LocatorError, PullRequestRef};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("prh/", env!("CARGO_PKG_VERSION"));

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The provided access token was invalid.
    #[error("invalid GitHub token: {reason}")]
    InvalidToken { reason: &'static str },

    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The upstream data source could not be reached.
    #[error("GitHub unavailable: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned an error response.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A commit in the response had a missing or unparsable author date.
    #[error("commit {sha} has an invalid timestamp: {value:?}")]
    InvalidTimestamp { sha: String, value: Option<String> },
}

/// GitHub REST API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
pub struct Client {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if
    /// the HTTP client fails to build. Validation happens here so a missing
    /// credential fails before any network call.
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Result<Self, GithubError> {
        let token = token.into();

        if token.is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            http,
            token,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the commits of a pull request, oldest page only.
    ///
    /// Pagination is deliberately not followed; a single review unit
    /// rarely exceeds one page of commits.
    pub async fn fetch_pull_commits(
        &self,
        pull: &PullRequestRef,
    ) -> Result<Vec<Commit>, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/commits",
            self.api_url, pull.owner, pull.repo, pull.number
        );
        tracing::debug!(%pull, %url, "fetching pull request commits");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GithubError::Api {
                status,
                message: parse_api_error(&body)
                    .unwrap_or_else(|| format!("unexpected response body: {body}")),
            });
        }

        let entries: Vec<CommitEntry> = serde_json::from_str(&body)
            .map_err(|err| GithubError::InvalidResponse(err.to_string()))?;
        map_commits(entries)
    }
}

/// One entry of the pull request commits payload, reduced to the fields
/// we read.
#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<GitActor>,
}

#[derive(Debug, Deserialize)]
struct GitActor {
    date: Option<String>,
}

/// Maps raw payload entries into [`Commit`] records.
///
/// A missing or unparsable author date is an error, never coerced to a
/// default instant; the estimator's precondition is that every timestamp
/// is a valid instant.
fn map_commits(entries: Vec<CommitEntry>) -> Result<Vec<Commit>, GithubError> {
    entries
        .into_iter()
        .map(|entry| {
            let date = entry.commit.author.and_then(|author| author.date);
            let timestamp = date
                .as_deref()
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| GithubError::InvalidTimestamp {
                    sha: entry.sha.clone(),
                    value: date,
                })?;
            Ok(Commit::new(entry.sha, timestamp))
        })
        .collect()
}

fn parse_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.message)
}
