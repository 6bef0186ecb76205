//! Batch resolver configuration and result types

use crate::config::DEFAULT_CONCURRENCY;
use crate::core::types::{Record, RecordId};
use crate::utils::error::JiraError;
use serde::Serialize;
use std::time::Duration;

/// How fetches are scheduled under the concurrency cap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduling {
    /// Start a new fetch as soon as any in-flight fetch settles
    #[default]
    SlidingWindow,
    /// Run consecutive chunks of `concurrency` fetches, waiting for every
    /// fetch of a chunk to settle before the next chunk starts
    ChunkBarrier,
}

/// Configuration for batch resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum simultaneous fetches (default: 10). Zero is rejected at
    /// resolve time.
    pub concurrency: usize,
    /// Timeout per individual fetch (default: none)
    pub fetch_timeout: Option<Duration>,
    /// Scheduling strategy (default: sliding window)
    pub scheduling: Scheduling,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: None,
            scheduling: Scheduling::default(),
        }
    }
}

impl BatchConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Bound each fetch; an expired fetch becomes a `Timeout` warning
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set scheduling strategy
    pub fn with_scheduling(mut self, scheduling: Scheduling) -> Self {
        self.scheduling = scheduling;
        self
    }
}

/// A recovered per-record failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWarning {
    /// Identifier whose fetch failed
    pub id: RecordId,
    /// Why it failed
    pub error: JiraError,
}

impl FetchWarning {
    /// Human-readable failure reason
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Records fetched by one resolve call plus the failures it recovered from
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Successful fetches, in completion order
    pub records: Vec<Record>,
    /// One entry per failed identifier
    pub warnings: Vec<FetchWarning>,
    /// Wall-clock time for the whole call
    pub elapsed: Duration,
}

impl BatchOutcome {
    /// Number of identifiers the call was asked to resolve
    pub fn requested(&self) -> usize {
        self.records.len() + self.warnings.len()
    }

    /// Number of identifiers that could not be fetched
    pub fn failed(&self) -> usize {
        self.warnings.len()
    }

    /// Whether any fetch failed
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Summary statistics for logging and reporting
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            requested: self.requested(),
            succeeded: self.records.len(),
            failed: self.failed(),
            elapsed: self.elapsed,
        }
    }
}

/// Summary of batch execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
