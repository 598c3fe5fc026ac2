//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record and its enumerated fields.
//! - Define the validated insert/patch shapes handed to repositories.
//!
//! # Invariants
//! - `id`, `created_at` and `updated_at` are assigned by the store.
//! - `title` is never blank once persisted.
//! - `description == None` means "no description", never `Some("")`.

use crate::model::list::ListId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a todo row.
pub type TodoId = Uuid;

/// Todo urgency bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Token used in the `todos.priority` column and in form submissions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Todo lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    Completed,
}

impl TodoStatus {
    /// Token used in the `todos.status` column and in form submissions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns the opposite state; `toggled(toggled(s)) == s`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

/// Persisted todo record as read back from the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TodoStatus,
    /// Unix epoch milliseconds. `None` means no deadline.
    pub due_date: Option<i64>,
    pub list_id: ListId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Todo {
    pub fn is_completed(&self) -> bool {
        self.status == TodoStatus::Completed
    }

    pub fn is_pending(&self) -> bool {
        self.status == TodoStatus::Pending
    }

    /// Returns whether the deadline has passed while the todo is still open.
    pub fn is_overdue(&self, now_ms: i64) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < now_ms)
    }
}

/// Validated insert payload. Status always starts as `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<i64>,
    pub list_id: ListId,
}

/// Validated partial update.
///
/// Outer `None` leaves a column untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<TodoStatus>,
    pub due_date: Option<Option<i64>>,
    pub list_id: Option<ListId>,
}

impl TodoPatch {
    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.list_id.is_none()
    }
}
