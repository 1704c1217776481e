//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;
use prh_github::PullRequestRef;

/// Estimate the active working hours behind a pull request.
///
/// Fetches the commit timestamps of a single pull request and clusters the
/// gaps between them into work sessions.
#[derive(Debug, Parser)]
#[command(name = "prh", version, about, long_about = None)]
pub struct Cli {
    /// Pull request URL (alternative to --org/--repo/--pull).
    pub url: Option<String>,

    /// GitHub organization or user.
    #[arg(short, long)]
    pub org: Option<String>,

    /// GitHub repository.
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Pull request number.
    #[arg(short, long)]
    pub pull: Option<u64>,

    /// Round the estimate to the nearest half hour.
    #[arg(long)]
    pub round: bool,

    /// Sum every cluster, skipping the 30-minute noise floor.
    ///
    /// Matches an earlier revision of the tool; the filtered default is
    /// canonical.
    #[arg(long)]
    pub no_noise_filter: bool,

    /// Emit the estimate and session breakdown as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolves the identifying triple from either invocation form.
    ///
    /// Fails fast, before any network call: a malformed URL, a mixed
    /// invocation, or missing discrete parameters are all rejected here.
    pub fn pull_request(&self) -> anyhow::Result<PullRequestRef> {
        if let Some(url) = &self.url {
            if self.org.is_some() || self.repo.is_some() || self.pull.is_some() {
                anyhow::bail!("pass either a pull request URL or --org/--repo/--pull, not both");
            }
            return PullRequestRef::from_url(url).map_err(Into::into);
        }

        match (&self.org, &self.repo, self.pull) {
            (Some(org), Some(repo), Some(number)) => {
                PullRequestRef::new(org, repo, number).map_err(Into::into)
            }
            _ => anyhow::bail!(
                "organization, repository, and pull request number are required \
                 (or pass a pull request URL)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("prh").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn discrete_flags_resolve_to_triple() {
        let cli = parse(&["--org", "acme", "--repo", "widgets", "--pull", "42"]);
        let pull = cli.pull_request().unwrap();
        assert_eq!(pull, PullRequestRef::new("acme", "widgets", 42).unwrap());
    }

    #[test]
    fn url_resolves_to_same_triple() {
        let cli = parse(&["https://github.com/acme/widgets/pull/42"]);
        let pull = cli.pull_request().unwrap();
        assert_eq!(pull, PullRequestRef::new("acme", "widgets", 42).unwrap());
    }

    #[test]
    fn missing_parameters_fail_fast() {
        let cli = parse(&["--org", "acme", "--repo", "widgets"]);
        let err = cli.pull_request().unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn mixing_url_and_flags_is_rejected() {
        let cli = parse(&["https://github.com/acme/widgets/pull/42", "--org", "acme"]);
        assert!(cli.pull_request().is_err());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let cli = parse(&["https://github.com/acme/widgets/issues/42"]);
        let err = cli.pull_request().unwrap_err();
        assert!(err.to_string().contains("not a pull request URL"));
    }

    #[test]
    fn output_flags_default_off() {
        let cli = parse(&["https://github.com/acme/widgets/pull/1"]);
        assert!(!cli.round);
        assert!(!cli.json);
        assert!(!cli.no_noise_filter);
    }
}
