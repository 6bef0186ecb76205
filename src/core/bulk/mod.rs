//! Bulk mutation submission and status tracking

mod tracker;
mod types;


pub use tracker::{BulkTaskTracker, subtask_request};
pub use types::{BulkMoveRequest, BulkTask, TargetMapping, TaskProgress, TaskStatus};
