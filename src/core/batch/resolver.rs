//! Bounded-concurrency record hydration
//!
//! Fetches a list of identifiers through a [`RecordFetcher`] with at most
//! `concurrency` fetches outstanding. Per-record failures are collected as
//! warnings; fatal failures (see [`JiraError::is_fatal`]) abort the call and
//! discard everything fetched so far.

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::types::{BatchConfig, BatchOutcome, FetchWarning, Scheduling};
use crate::config::DEFAULT_CONCURRENCY;
use crate::core::traits::RecordFetcher;
use crate::core::types::{Record, RecordId};
use crate::utils::error::{JiraError, Result};

/// Resolves identifiers into full records with bounded parallelism
#[derive(Debug, Clone)]
pub struct BatchResolver<F> {
    fetcher: F,
    config: BatchConfig,
}

impl<F: RecordFetcher> BatchResolver<F> {
    /// Create a new resolver
    pub fn new(fetcher: F, config: BatchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Resolver with default config and the given concurrency
    pub fn with_concurrency(fetcher: F, concurrency: usize) -> Self {
        Self::new(fetcher, BatchConfig::new().with_concurrency(concurrency))
    }

    /// Get current configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Collaborator used for single-record fetches
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch every identifier and return successes together with the
    /// recovered failures.
    ///
    /// Duplicated identifiers are fetched once per occurrence.
    pub async fn resolve(&self, ids: &[RecordId]) -> Result<BatchOutcome> {
        let concurrency = self.config.concurrency;
        if concurrency == 0 {
            return Err(JiraError::InvalidArgument(
                "concurrency must be a positive integer".to_string(),
            ));
        }
        if ids.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let start = Instant::now();
        debug!(
            requested = ids.len(),
            concurrency,
            scheduling = ?self.config.scheduling,
            "Resolving batch"
        );

        let mut acc = Accumulator::with_capacity(ids.len());
        let outcome = match self.config.scheduling {
            Scheduling::SlidingWindow => self.run_sliding_window(ids, &mut acc).await,
            Scheduling::ChunkBarrier => self.run_chunk_barrier(ids, &mut acc).await,
        };
        if let Err(e) = outcome {
            warn!(
                code = e.code(),
                settled = acc.records.len() + acc.warnings.len(),
                requested = ids.len(),
                "Aborting batch: {}",
                e
            );
            return Err(e);
        }

        let outcome = acc.finish(start.elapsed());
        log_warnings(&outcome.warnings);
        info!(
            requested = ids.len(),
            succeeded = outcome.records.len(),
            failed = outcome.warnings.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Batch resolved"
        );
        Ok(outcome)
    }

    /// Like [`resolve`](Self::resolve) but returns only the records; failures
    /// are still logged.
    pub async fn resolve_records(&self, ids: &[RecordId]) -> Result<Vec<Record>> {
        self.resolve(ids).await.map(|outcome| outcome.records)
    }

    async fn run_sliding_window(&self, ids: &[RecordId], acc: &mut Accumulator) -> Result<()> {
        let fetcher = &self.fetcher;
        let timeout = self.config.fetch_timeout;

        let mut settled = stream::iter(ids)
            .map(move |id| async move { (id, fetch_bounded(fetcher, id, timeout).await) })
            .buffer_unordered(self.config.concurrency);

        while let Some((id, result)) = settled.next().await {
            acc.settle(id, result)?;
        }
        Ok(())
    }

    async fn run_chunk_barrier(&self, ids: &[RecordId], acc: &mut Accumulator) -> Result<()> {
        let fetcher = &self.fetcher;
        let timeout = self.config.fetch_timeout;

        for (index, chunk) in ids.chunks(self.config.concurrency).enumerate() {
            debug!(chunk = index, size = chunk.len(), "Starting chunk");
            let results = join_all(
                chunk
                    .iter()
                    .map(move |id| async move { (id, fetch_bounded(fetcher, id, timeout).await) }),
            )
            .await;

            for (id, result) in results {
                acc.settle(id, result)?;
            }
        }
        Ok(())
    }
}

impl<F: RecordFetcher + Default> Default for BatchResolver<F> {
    fn default() -> Self {
        Self::new(F::default(), BatchConfig::default())
    }
}

/// Resolve `ids` through `fetcher` with a sliding window of `concurrency`
/// fetches, returning only the successfully fetched records.
pub async fn resolve_batch<F>(fetcher: F, ids: &[RecordId], concurrency: usize) -> Result<Vec<Record>>
where
    F: RecordFetcher,
{
    BatchResolver::with_concurrency(fetcher, concurrency)
        .resolve_records(ids)
        .await
}

/// [`resolve_batch`] at the default concurrency of 10
pub async fn resolve_batch_default<F>(fetcher: F, ids: &[RecordId]) -> Result<Vec<Record>>
where
    F: RecordFetcher,
{
    resolve_batch(fetcher, ids, DEFAULT_CONCURRENCY).await
}

async fn fetch_bounded<F: RecordFetcher + ?Sized>(
    fetcher: &F,
    id: &RecordId,
    timeout: Option<Duration>,
) -> Result<Record> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fetcher.fetch_one(id))
            .await
            .map_err(|_| {
                JiraError::Timeout(format!("Fetching {} timed out after {:?}", id, limit))
            })?,
        None => fetcher.fetch_one(id).await,
    }
}

/// Per-call accumulation state
struct Accumulator {
    records: Vec<Record>,
    warnings: Vec<FetchWarning>,
}

impl Accumulator {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            warnings: Vec::new(),
        }
    }

    /// Record one settled fetch; fatal errors are handed back to the caller.
    fn settle(&mut self, id: &RecordId, result: Result<Record>) -> Result<()> {
        match result {
            Ok(record) => self.records.push(record),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!(id = %id, code = e.code(), "Fetch failed: {}", e);
                self.warnings.push(FetchWarning {
                    id: id.clone(),
                    error: e,
                });
            }
        }
        Ok(())
    }

    fn finish(self, elapsed: Duration) -> BatchOutcome {
        BatchOutcome {
            records: self.records,
            warnings: self.warnings,
            elapsed,
        }
    }
}

fn log_warnings(warnings: &[FetchWarning]) {
    if warnings.is_empty() {
        return;
    }
    warn!("Failed to fetch {} record(s):", warnings.len());
    for warning in warnings {
        warn!(id = %warning.id, code = warning.error.code(), "  - {}: {}", warning.id, warning.error);
    }
}
