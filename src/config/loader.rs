//! Configuration loading from environment variables

use super::{ConfigReport, JiraConfig, Validate};
use crate::utils::error::{JiraError, Result};
use std::env;
use tracing::debug;

/// Site URL
pub const ENV_URL: &str = "JIRA_URL";
/// Account email
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
/// API token
pub const ENV_API_KEY: &str = "JIRA_API_KEY";
/// Optional HTTP timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "JIRA_TIMEOUT_SECS";
/// Optional default batch concurrency
pub const ENV_CONCURRENCY: &str = "JIRA_CONCURRENCY";

impl JiraConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// All missing required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");

        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = [ENV_URL, ENV_EMAIL, ENV_API_KEY]
            .into_iter()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(JiraError::Config(format!(
                "{} environment variable(s) must be set",
                missing.join(", ")
            )));
        }

        let mut config = JiraConfig::new(
            get(ENV_URL).unwrap_or_default(),
            get(ENV_EMAIL).unwrap_or_default(),
            get(ENV_API_KEY).unwrap_or_default(),
        );

        if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| JiraError::Config(format!("Invalid {}: {}", ENV_TIMEOUT_SECS, e)))?;
        }
        if let Some(concurrency) = get(ENV_CONCURRENCY) {
            config.concurrency = concurrency
                .trim()
                .parse()
                .map_err(|e| JiraError::Config(format!("Invalid {}: {}", ENV_CONCURRENCY, e)))?;
        }

        config.validate()?;

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }

    /// Presence report of the environment, even when required variables
    /// are missing
    pub fn report_from_env() -> ConfigReport {
        Self::report_from_lookup(|key| env::var(key).ok())
    }

    /// Like [`report_from_env`](Self::report_from_env) over an arbitrary lookup
    pub fn report_from_lookup<F>(lookup: F) -> ConfigReport
    where
        F: Fn(&str) -> Option<String>,
    {
        JiraConfig::new(
            lookup(ENV_URL).unwrap_or_default(),
            lookup(ENV_EMAIL).unwrap_or_default(),
            lookup(ENV_API_KEY).unwrap_or_default(),
        )
        .report()
    }
}
