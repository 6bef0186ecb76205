//! Utility modules for jira-batch
//!
//! - **error**: error taxonomy and `Result` alias
//! - **logging**: tracing subscriber setup and redaction helpers

pub mod error;
pub mod logging;

pub use error::{JiraError, Result};
pub use logging::{init_tracing, redact};
