//! Jira REST wire models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::bulk::{BulkMoveRequest, BulkTask, TaskProgress, TaskStatus};
use crate::core::types::{RecordId, SearchPage, TaskId};
use crate::utils::error::JiraError;

/// Lightweight issue reference returned by `/search/jql`
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRef {
    pub id: RecordId,
}

/// Response of `GET /rest/api/3/search/jql`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIdsResponse {
    #[serde(default)]
    pub issues: Vec<IssueRef>,
    #[serde(default)]
    pub is_last: Option<bool>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl From<SearchIdsResponse> for SearchPage {
    fn from(response: SearchIdsResponse) -> Self {
        // Responses without `isLast` signal continuation through `nextPageToken`.
        let is_last = response
            .is_last
            .unwrap_or(response.next_page_token.is_none());
        SearchPage::new(
            response.issues.into_iter().map(|issue| issue.id).collect(),
            is_last,
        )
    }
}

/// Sources moved to one target
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetToSources {
    pub infer_classification_defaults: bool,
    pub infer_field_defaults: bool,
    pub infer_status_defaults: bool,
    pub infer_subtask_type_default: bool,
    pub issue_ids_or_keys: Vec<RecordId>,
}

/// Body of `POST /rest/api/3/bulk/issues/move`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMovePayload {
    pub send_bulk_notification: bool,
    pub target_to_sources_mapping: BTreeMap<String, TargetToSources>,
}

impl From<&BulkMoveRequest> for BulkMovePayload {
    fn from(request: &BulkMoveRequest) -> Self {
        let sources = TargetToSources {
            infer_classification_defaults: true,
            infer_field_defaults: request.infer_field_defaults,
            infer_status_defaults: request.infer_status_defaults,
            infer_subtask_type_default: true,
            issue_ids_or_keys: request.ids.clone(),
        };

        let mut mapping = BTreeMap::new();
        mapping.insert(request.mapping_key(), sources);

        Self {
            send_bulk_notification: request.send_notification,
            target_to_sources_mapping: mapping,
        }
    }
}

/// Response of a bulk submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedTaskResponse {
    pub task_id: TaskId,
}

/// Response of `GET /rest/api/3/bulk/tasks/{taskId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTaskResponse {
    pub task_id: TaskId,
    pub status: String,
    #[serde(default)]
    pub progress_percent: Option<u8>,
    #[serde(default)]
    pub processed_accessible_issues: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub invalid_or_inaccessible_issue_count: Option<usize>,
    #[serde(default)]
    pub total_issue_count: Option<usize>,
}

impl TryFrom<BulkTaskResponse> for BulkTask {
    type Error = JiraError;

    fn try_from(response: BulkTaskResponse) -> Result<Self, Self::Error> {
        let status = TaskStatus::from_wire(&response.status).ok_or_else(|| {
            JiraError::Serialization(format!(
                "unknown bulk task status '{}'",
                response.status
            ))
        })?;

        let progress = TaskProgress {
            percent: response.progress_percent,
            processed: response.processed_accessible_issues.map(|issues| issues.len()),
            invalid: response.invalid_or_inaccessible_issue_count,
            total: response.total_issue_count,
        };

        Ok(BulkTask::new(response.task_id, status).with_progress(progress))
    }
}
