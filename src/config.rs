//! Bootstrap configuration
//!
//! Read once by the binary and injected into the handler. Sources, later ones
//! winning: built-in defaults, `config.toml`, environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::indexa::{Credentials, DEFAULT_API_URL};

pub const ENV_TOKEN: &str = "INBOT_TOKEN";
/// Variable name read by earlier Lambda deployments
pub const ENV_TOKEN_FALLBACK: &str = "TOKEN";
pub const ENV_API_URL: &str = "INBOT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "INBOT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub token: Option<String>,
    pub api_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// `<config_home>/inbot/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("inbot").join("config.toml"))
}

impl Config {
    /// Load from `path` (must exist) or from the default location (optional),
    /// then apply the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };

        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading config from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply overrides looked up through `lookup` (the environment in production)
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty(ENV_TOKEN).or_else(|| non_empty(ENV_TOKEN_FALLBACK)) {
            self.token = Some(token);
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(secs) = non_empty(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse()
                .map_err(|_| anyhow!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs))?;
            self.timeout_secs = Some(secs);
        }

        Ok(self)
    }

    /// Credentials for the brokerage; empty when no token is configured
    pub fn credentials(&self) -> Credentials {
        self.token.as_deref().map(Credentials::new).unwrap_or_default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
