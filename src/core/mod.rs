//! Core functionality
//!
//! Batch hydration, paginated search and bulk task tracking, plus the
//! collaborator contracts they are written against.

pub mod batch;
pub mod bulk;
pub mod providers;
pub mod search;
pub mod traits;
pub mod types;
