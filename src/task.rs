//! The persisted task record.
//!
//! A task is the sole domain entity: a titled unit of work with a status.
//! Rows live in the `tasks` table and are only ever mutated through
//! [`crate::service::TaskService`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    /// The stored (and wire) form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Parse the stored form back into the enum.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// A task as persisted in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Storage-assigned identity, immutable once assigned.
    pub id: i64,
    /// Non-empty title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Set exactly once at creation.
    pub created_at: DateTime<Utc>,
    /// Null until the first update, then refreshed on every mutation.
    pub updated_at: Option<DateTime<Utc>>,
}
