//! Collaborator contracts consumed by the core
//!
//! The batch resolver, search coordinator and bulk task tracker only ever talk
//! to the remote store through these traits. [`crate::core::providers::jira::JiraClient`]
//! implements all three; tests substitute instrumented stubs.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::bulk::{BulkMoveRequest, BulkTask};
use crate::core::types::{Record, RecordId, SearchPage, TaskId};
use crate::utils::error::Result;

/// Fetches one full record by identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fails with `NotFound` or `Network` for per-record problems and with
    /// `Auth` when credentials are rejected.
    async fn fetch_one(&self, id: &RecordId) -> Result<Record>;
}

/// Runs a lightweight search returning identifiers only
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, page_size: usize, offset: usize) -> Result<SearchPage>;
}

/// Submits bulk mutations and reports their progress
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BulkBackend: Send + Sync {
    async fn submit_bulk(&self, request: &BulkMoveRequest) -> Result<TaskId>;

    async fn poll_bulk(&self, task_id: &TaskId) -> Result<BulkTask>;
}

#[async_trait]
impl<T: RecordFetcher + ?Sized> RecordFetcher for Arc<T> {
    async fn fetch_one(&self, id: &RecordId) -> Result<Record> {
        (**self).fetch_one(id).await
    }
}

#[async_trait]
impl<T: SearchBackend + ?Sized> SearchBackend for Arc<T> {
    async fn search(&self, query: &str, page_size: usize, offset: usize) -> Result<SearchPage> {
        (**self).search(query, page_size, offset).await
    }
}

#[async_trait]
impl<T: BulkBackend + ?Sized> BulkBackend for Arc<T> {
    async fn submit_bulk(&self, request: &BulkMoveRequest) -> Result<TaskId> {
        (**self).submit_bulk(request).await
    }

    async fn poll_bulk(&self, task_id: &TaskId) -> Result<BulkTask> {
        (**self).poll_bulk(task_id).await
    }
}

#[async_trait]
impl<'a, T: RecordFetcher + ?Sized> RecordFetcher for &'a T {
    async fn fetch_one(&self, id: &RecordId) -> Result<Record> {
        (**self).fetch_one(id).await
    }
}

#[async_trait]
impl<'a, T: SearchBackend + ?Sized> SearchBackend for &'a T {
    async fn search(&self, query: &str, page_size: usize, offset: usize) -> Result<SearchPage> {
        (**self).search(query, page_size, offset).await
    }
}

#[async_trait]
impl<'a, T: BulkBackend + ?Sized> BulkBackend for &'a T {
    async fn submit_bulk(&self, request: &BulkMoveRequest) -> Result<TaskId> {
        (**self).submit_bulk(request).await
    }

    async fn poll_bulk(&self, task_id: &TaskId) -> Result<BulkTask> {
        (**self).poll_bulk(task_id).await
    }
}
