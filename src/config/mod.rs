//! Configuration management
//!
//! Connection settings for the Jira collaborator and defaults for the batch
//! layer. Configuration is loaded once (from the environment or a YAML file)
//! and injected into [`crate::core::providers::jira::JiraClient`] at
//! construction; nothing else in the crate reads the environment.

pub mod loader;
pub mod validation;

pub use validation::{ConfigReport, Validate};

use crate::utils::error::{JiraError, Result};
use crate::utils::logging::redact;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Default number of simultaneous record fetches
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Issue type id Jira Cloud assigns to the built-in sub-task type
pub const DEFAULT_SUBTASK_ISSUE_TYPE_ID: &str = "10002";

/// Jira connection and batch defaults
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net`, without trailing slash
    pub base_url: String,
    /// Account email used for basic auth
    pub email: String,
    /// API token paired with `email`
    pub api_token: String,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Default concurrency for batch hydration
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Issue type id used when converting issues to sub-tasks
    #[serde(default = "default_subtask_issue_type_id")]
    pub subtask_issue_type_id: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_subtask_issue_type_id() -> String {
    DEFAULT_SUBTASK_ISSUE_TYPE_ID.to_string()
}

impl JiraConfig {
    /// Create a config with default timeout and concurrency
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            email: email.into(),
            api_token: api_token.into(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            subtask_issue_type_id: default_subtask_issue_type_id(),
        }
    }

    /// Set the HTTP timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the default batch concurrency
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;

        let mut config: JiraConfig = serde_yaml::from_str(&content)
            .map_err(|e| JiraError::Config(format!("Failed to parse config: {}", e)))?;
        config.base_url = normalize_base_url(&config.base_url);

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// HTTP timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &redact(&self.api_token))
            .field("timeout_secs", &self.timeout_secs)
            .field("concurrency", &self.concurrency)
            .field("subtask_issue_type_id", &self.subtask_issue_type_id)
            .finish()
    }
}

/// Strip trailing slashes so endpoint paths can be appended verbatim
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
