//! Error types for jira-batch
//!
//! Every fallible operation in the crate returns [`JiraError`]. The resolver
//! splits the variants into fatal ones, which abort the whole operation, and
//! recoverable ones, which are downgraded to per-record warnings.

use thiserror::Error;

/// Result type alias for jira-batch
pub type Result<T> = std::result::Result<T, JiraError>;

/// Main error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JiraError {
    /// Caller supplied a value the operation cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Credentials were rejected by the remote store
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The identifier has no corresponding record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// A request did not settle in time
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Remote store rejected one request as malformed (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Remote store throttled the request
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success HTTP status
    #[error("Jira API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl JiraError {
    /// Create an API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error aborts a whole batch or search instead of being
    /// recorded as a per-record warning.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::Auth(_) | Self::Config(_)
        )
    }

    /// Short machine-friendly code, used in structured log fields
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Auth(_) => "AUTH_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::RateLimited(_) => "RATE_LIMITED",
            Self::Api { .. } => "API_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<reqwest::Error> for JiraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for JiraError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for JiraError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(format!("IO error: {}", err))
    }
}
