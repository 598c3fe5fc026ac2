//! List domain model.
//!
//! A list is a named, colored grouping of todos. Nothing ties a list to its
//! todos beyond `Todo::list_id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a list row.
pub type ListId = Uuid;

/// Persisted list record as read back from the `lists` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    /// Free-form color token, usually a hex code such as `#3B82F6`.
    pub color: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

/// Validated insert payload for a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    pub name: String,
    pub color: String,
}
