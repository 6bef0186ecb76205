//! Jira error mapping

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::utils::error::JiraError;

/// Longest slice of a raw body kept in an error message
const MAX_RAW_BODY: usize = 200;

/// Jira's standard error envelope
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorCollection {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

/// Maps non-success HTTP responses onto [`JiraError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JiraErrorMapper;

impl JiraErrorMapper {
    pub fn map_http_error(&self, status_code: u16, response_body: &str) -> JiraError {
        let message = extract_message(response_body);
        match status_code {
            401 | 403 => JiraError::Auth(message),
            404 => JiraError::NotFound(message),
            400 => JiraError::BadRequest(message),
            429 => JiraError::RateLimited(message),
            _ => JiraError::api(status_code, message),
        }
    }
}

/// Flatten `errorMessages` and `errors` into one line, falling back to a
/// truncated raw body.
fn extract_message(body: &str) -> String {
    if let Ok(collection) = serde_json::from_str::<ErrorCollection>(body) {
        let mut parts = collection.error_messages;
        parts.extend(
            collection
                .errors
                .into_iter()
                .map(|(field, message)| format!("{}: {}", field, message)),
        );
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(MAX_RAW_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
