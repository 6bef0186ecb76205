//! # jira-batch
//!
//! Bounded-concurrency hydration of Jira search results, paginated search,
//! and bulk-move task tracking over the Jira Cloud REST API v3.
//!
//! ## Features
//!
//! - **Batch resolution**: fetch many issues with a hard cap on simultaneous
//!   requests; per-issue failures become warnings instead of aborting the batch
//! - **Paginated search**: JQL search returning ids only, hydrated through the
//!   batch resolver; callers page with `offset += page_size` until `is_last`
//! - **Bulk tasks**: submit bulk moves (including sub-task conversion) and read
//!   their status by task id
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_batch::{JiraClient, JiraConfig, SearchCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JiraClient::new(JiraConfig::from_env()?)?;
//!     let coordinator = SearchCoordinator::new(&client, &client);
//!
//!     let mut offset = 0;
//!     loop {
//!         let page = coordinator.paged_search("project = OPS", 50, offset).await?;
//!         println!("{} issues ({} failed)", page.records.len(), page.warnings.len());
//!         if page.is_last {
//!             break;
//!         }
//!         offset += 50;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::JiraConfig;
pub use utils::error::{JiraError, Result};

pub use core::batch::{
    BatchConfig, BatchOutcome, BatchResolver, BatchSummary, FetchWarning, Scheduling,
    resolve_batch, resolve_batch_default,
};
pub use core::bulk::{
    BulkMoveRequest, BulkTask, BulkTaskTracker, TargetMapping, TaskProgress, TaskStatus,
};
pub use core::providers::JiraClient;
pub use core::search::{PagedResult, SearchCoordinator, SearchRequest, paged_search};
pub use core::traits::{BulkBackend, RecordFetcher, SearchBackend};
pub use core::types::{Record, RecordId, SearchPage, TaskId};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
