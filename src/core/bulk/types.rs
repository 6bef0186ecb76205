//! Bulk mutation request and task types

use serde::Serialize;
use std::fmt;

use crate::core::types::{RecordId, TaskId};

/// Destination of a bulk move: project, issue type and optional parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetMapping {
    pub project_key: String,
    pub issue_type_id: String,
    pub parent_key: Option<RecordId>,
}

impl TargetMapping {
    pub fn new(project_key: impl Into<String>, issue_type_id: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            issue_type_id: issue_type_id.into(),
            parent_key: None,
        }
    }

    pub fn with_parent(mut self, parent_key: impl Into<RecordId>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    /// Key of the target-to-sources mapping:
    /// `"project,issueType"` or `"project,issueType,parent"`.
    pub fn mapping_key(&self) -> String {
        match &self.parent_key {
            Some(parent) => format!("{},{},{}", self.project_key, self.issue_type_id, parent),
            None => format!("{},{}", self.project_key, self.issue_type_id),
        }
    }
}

/// A bulk move of `ids` to one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkMoveRequest {
    pub target: TargetMapping,
    pub ids: Vec<RecordId>,
    pub send_notification: bool,
    pub infer_field_defaults: bool,
    pub infer_status_defaults: bool,
}

impl BulkMoveRequest {
    /// Request with notifications off and field/status defaults inferred
    pub fn new(target: TargetMapping, ids: Vec<RecordId>) -> Self {
        Self {
            target,
            ids,
            send_notification: false,
            infer_field_defaults: true,
            infer_status_defaults: true,
        }
    }

    pub fn with_notification(mut self, send_notification: bool) -> Self {
        self.send_notification = send_notification;
        self
    }

    pub fn with_infer_field_defaults(mut self, infer: bool) -> Self {
        self.infer_field_defaults = infer;
        self
    }

    pub fn with_infer_status_defaults(mut self, infer: bool) -> Self {
        self.infer_status_defaults = infer;
        self
    }

    pub fn mapping_key(&self) -> String {
        self.target.mapping_key()
    }
}

/// Lifecycle state of a bulk task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    /// Map a status string reported by Jira
    pub fn from_wire(status: &str) -> Option<Self> {
        match status.trim().to_ascii_uppercase().as_str() {
            "ENQUEUED" | "PENDING" => Some(Self::Pending),
            "RUNNING" | "IN_PROGRESS" | "CANCEL_REQUESTED" => Some(Self::InProgress),
            "COMPLETE" | "COMPLETED" => Some(Self::Completed),
            "FAILED" | "DEAD" => Some(Self::Failed),
            "CANCELLED" | "CANCELED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// No further status changes will be reported
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress counters as reported by the store; any may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskProgress {
    pub percent: Option<u8>,
    pub processed: Option<usize>,
    pub invalid: Option<usize>,
    pub total: Option<usize>,
}

/// Snapshot of an asynchronous bulk task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkTask {
    pub task_id: TaskId,
    pub status: TaskStatus,
    pub progress: TaskProgress,
}

impl BulkTask {
    pub fn new(task_id: impl Into<TaskId>, status: TaskStatus) -> Self {
        Self {
            task_id: task_id.into(),
            status,
            progress: TaskProgress::default(),
        }
    }

    pub fn with_progress(mut self, progress: TaskProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
