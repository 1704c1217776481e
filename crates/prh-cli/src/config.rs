//! Configuration loading and management.
//!
//! The token and API base URL are resolved here, once, and passed
//! explicitly into the GitHub client so neither the estimator nor its
//! tests touch ambient process state.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub access token used for the commit-listing API.
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API.
    pub api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_url: prh_github::GITHUB_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    ///
    /// Later layers win: defaults, then the platform config file, then the
    /// explicit `--config` file, then `PRH_*` environment variables, then
    /// `GITHUB_TOKEN`.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PRH_*), then the conventional
        // GITHUB_TOKEN variable.
        figment = figment.merge(Env::prefixed("PRH_"));
        figment = figment.merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        figment.extract()
    }
}

/// Returns the platform-specific config directory for prh.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("prh"))
}
