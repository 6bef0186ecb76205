//! Jira Cloud provider
//!
//! REST v3 implementation of the record fetcher, search and bulk contracts.

mod client;
mod error;
mod models;

pub use client::JiraClient;
pub use error::JiraErrorMapper;
pub use models::{BulkMovePayload, BulkTaskResponse, SearchIdsResponse};
