//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical `Task` record plus insert/patch payloads.
//! - Validate caller-supplied fields before they reach the store.
//!
//! # Invariants
//! - `id` is unique across a loaded collection and never reused.
//! - `title` is non-empty after trimming.
//! - `updated_at >= created_at` for any stored task.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the store at insert time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task lifecycle state.
///
/// Wire values are kebab-case (`pending`, `in-progress`, `completed`) to
/// match the remote table's column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Finished successfully.
    Completed,
}

impl TaskStatus {
    /// Storage-column representation.
    pub fn as_store_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a storage-column value. Returns `None` for unknown input.
    pub fn from_store_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Task urgency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Storage-column representation.
    pub fn as_store_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a storage-column value. Returns `None` for unknown input.
    pub fn from_store_str(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Validation failure for caller-supplied task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `title` is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record as stored by the remote table.
///
/// Timestamps are epoch milliseconds assigned store-side; callers never
/// write them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID, immutable once assigned.
    pub id: TaskId,
    /// Short human-readable summary. Never empty.
    pub title: String,
    /// Optional longer body.
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Optional deadline, epoch milliseconds.
    pub due_date: Option<i64>,
    /// Set once at insert, epoch milliseconds.
    pub created_at: i64,
    /// Refreshed by the store on every mutation.
    pub updated_at: i64,
}

impl Task {
    /// Checks invariants that storage and read paths must uphold.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}

/// Insert payload: everything the caller chooses, nothing the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskFields {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<i64>,
}

impl NewTaskFields {
    /// Creates an insert payload with no description or deadline.
    pub fn new(title: impl Into<String>, status: TaskStatus, priority: TaskPriority) -> Self {
        Self {
            title: title.into(),
            description: None,
            status,
            priority,
            due_date: None,
        }
    }

    /// Checks insert payload invariants before any SQL runs.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update payload. `None` fields are left untouched; the merge
/// happens store-side in one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<i64>,
}

impl TaskPatch {
    /// Checks patch invariants before any SQL runs.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Returns whether the patch carries no field at all.
    ///
    /// An empty patch is still a legal update: it only refreshes
    /// `updated_at` and asserts the row exists.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}
