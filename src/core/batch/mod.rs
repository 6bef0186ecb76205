//! Batch resolution of record identifiers
//!
//! Hydrates lists of identifiers into full records with a hard cap on
//! simultaneous fetches, tolerating per-record failures.

mod resolver;
mod types;


pub use resolver::{BatchResolver, resolve_batch, resolve_batch_default};
pub use types::{BatchConfig, BatchOutcome, BatchSummary, FetchWarning, Scheduling};
