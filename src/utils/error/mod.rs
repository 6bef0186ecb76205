//! Error handling utilities
//!
//! This module defines the error taxonomy shared by the resolver, the search
//! coordinator, the bulk task tracker and the Jira client.

pub mod error;

// Re-export commonly used types
pub use error::*;
