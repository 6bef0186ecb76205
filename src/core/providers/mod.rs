//! Remote store providers
//!
//! Concrete implementations of the collaborator traits in [`crate::core::traits`].

pub mod jira;

pub use jira::JiraClient;
