//! Bulk mutation task tracker
//!
//! Submits bulk moves and looks up their status. There is no polling loop:
//! callers decide how often to ask and when a terminal status ends the wait.

use tracing::{debug, info};

use super::types::{BulkMoveRequest, BulkTask, TargetMapping};
use crate::config::DEFAULT_SUBTASK_ISSUE_TYPE_ID;
use crate::core::traits::BulkBackend;
use crate::core::types::{RecordId, TaskId};
use crate::utils::error::{JiraError, Result};

#[derive(Debug, Clone)]
pub struct BulkTaskTracker<B> {
    backend: B,
    subtask_issue_type_id: String,
}

impl<B: BulkBackend> BulkTaskTracker<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            subtask_issue_type_id: DEFAULT_SUBTASK_ISSUE_TYPE_ID.to_string(),
        }
    }

    /// Override the issue type id used by [`convert_to_subtasks`](Self::convert_to_subtasks)
    pub fn with_subtask_issue_type_id(mut self, issue_type_id: impl Into<String>) -> Self {
        self.subtask_issue_type_id = issue_type_id.into();
        self
    }

    pub fn subtask_issue_type_id(&self) -> &str {
        &self.subtask_issue_type_id
    }

    /// Submit a bulk move and return the handle of the task it created
    pub async fn submit_bulk_mutation(&self, request: &BulkMoveRequest) -> Result<TaskId> {
        validate_request(request)?;

        let task_id = self.backend.submit_bulk(request).await?;
        info!(
            task_id = %task_id,
            target = %request.mapping_key(),
            count = request.ids.len(),
            "Bulk mutation submitted"
        );
        Ok(task_id)
    }

    /// Current snapshot of a bulk task. Each call is one remote read.
    pub async fn get_task_status(&self, task_id: &TaskId) -> Result<BulkTask> {
        if task_id.is_blank() {
            return Err(JiraError::InvalidArgument(
                "task id cannot be empty".to_string(),
            ));
        }

        let task = self.backend.poll_bulk(task_id).await?;
        debug!(
            task_id = %task.task_id,
            status = %task.status,
            percent = ?task.progress.percent,
            "Bulk task status"
        );
        Ok(task)
    }

    /// Turn `ids` into sub-tasks of `parent`, taking the project from the
    /// parent's key prefix (`"X-9"` → `"X"`).
    pub async fn convert_to_subtasks(&self, ids: &[RecordId], parent: &RecordId) -> Result<TaskId> {
        let request = subtask_request(ids, parent, None, &self.subtask_issue_type_id)?;
        self.submit_bulk_mutation(&request).await
    }

    /// Like [`convert_to_subtasks`](Self::convert_to_subtasks) with an
    /// explicit project key
    pub async fn convert_to_subtasks_in(
        &self,
        ids: &[RecordId],
        parent: &RecordId,
        project_key: &str,
    ) -> Result<TaskId> {
        let request = subtask_request(ids, parent, Some(project_key), &self.subtask_issue_type_id)?;
        self.submit_bulk_mutation(&request).await
    }
}

/// Build the bulk move that re-parents `ids` under `parent` as sub-tasks.
///
/// Pure: performs no I/O.
pub fn subtask_request(
    ids: &[RecordId],
    parent: &RecordId,
    project_key: Option<&str>,
    subtask_issue_type_id: &str,
) -> Result<BulkMoveRequest> {
    let project_key = match project_key.map(str::trim).filter(|p| !p.is_empty()) {
        Some(project) => project.to_string(),
        None => parent.namespace().map(str::to_string).ok_or_else(|| {
            JiraError::InvalidArgument(format!(
                "cannot derive a project key from parent '{}'",
                parent
            ))
        })?,
    };

    let target = TargetMapping::new(project_key, subtask_issue_type_id).with_parent(parent.clone());
    Ok(BulkMoveRequest::new(target, ids.to_vec()))
}

fn validate_request(request: &BulkMoveRequest) -> Result<()> {
    if request.ids.is_empty() {
        return Err(JiraError::InvalidArgument(
            "bulk mutation needs at least one identifier".to_string(),
        ));
    }
    if request.ids.iter().any(RecordId::is_blank) {
        return Err(JiraError::InvalidArgument(
            "bulk mutation identifiers cannot be empty".to_string(),
        ));
    }
    if request.target.project_key.trim().is_empty() {
        return Err(JiraError::InvalidArgument(
            "target project key cannot be empty".to_string(),
        ));
    }
    if request.target.issue_type_id.trim().is_empty() {
        return Err(JiraError::InvalidArgument(
            "target issue type id cannot be empty".to_string(),
        ));
    }
    Ok(())
}
