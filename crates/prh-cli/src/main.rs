use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prh_cli::{Cli, Config, report};
use prh_core::EstimatorConfig;
use prh_github::Client;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    // Resolve the triple and credentials before touching the network.
    let pull = cli.pull_request()?;
    let token = config.github_token.as_deref().context(
        "GitHub token is required; set github_token in the config file \
         or the GITHUB_TOKEN environment variable",
    )?;

    let client = Client::new(token, config.api_url.clone())?;
    let commits = client
        .fetch_pull_commits(&pull)
        .await
        .with_context(|| format!("failed to fetch commits for {pull}"))?;

    if commits.is_empty() {
        tracing::warn!(%pull, "pull request has no commits; estimating zero hours");
    }

    let estimator = EstimatorConfig {
        filter_short_sessions: !cli.no_noise_filter,
        ..EstimatorConfig::default()
    };
    let estimate = prh_core::estimate_active_hours(&commits, &estimator);

    if cli.json {
        println!("{}", report::render_json(&estimate)?);
    } else {
        println!("{}", report::render_text(&estimate, cli.round));
    }

    Ok(())
}
