//! Configuration validation

use super::JiraConfig;
use super::loader::{ENV_API_KEY, ENV_EMAIL, ENV_URL};
use crate::utils::error::{JiraError, Result};
use serde::Serialize;
use url::Url;

/// Trait for validating configuration structures
pub trait Validate {
    /// Validate the configuration
    fn validate(&self) -> Result<()>;
}

impl Validate for JiraConfig {
    fn validate(&self) -> Result<()> {
        let report = self.report();
        if !report.valid {
            return Err(JiraError::Config(format!(
                "{} must be set",
                report.missing.join(", ")
            )));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            JiraError::Config(format!("{} has invalid URL format: {}", ENV_URL, e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(JiraError::Config(format!(
                    "{} must use http:// or https:// scheme, got: {}",
                    ENV_URL, scheme
                )));
            }
        }

        if self.concurrency == 0 {
            return Err(JiraError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(JiraError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.subtask_issue_type_id.trim().is_empty() {
            return Err(JiraError::Config(
                "subtask_issue_type_id cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Presence check of the connection settings, safe to print
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigReport {
    pub valid: bool,
    pub missing: Vec<&'static str>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub api_key_length: usize,
}

impl JiraConfig {
    /// Report which connection settings are present without exposing the token
    pub fn report(&self) -> ConfigReport {
        let present = |value: &str| (!value.trim().is_empty()).then(|| value.to_string());

        let url = present(&self.base_url);
        let email = present(&self.email);
        let mut missing = Vec::new();
        if url.is_none() {
            missing.push(ENV_URL);
        }
        if email.is_none() {
            missing.push(ENV_EMAIL);
        }
        if self.api_token.trim().is_empty() {
            missing.push(ENV_API_KEY);
        }

        ConfigReport {
            valid: missing.is_empty(),
            missing,
            url,
            email,
            api_key_length: self.api_token.chars().count(),
        }
    }
}
