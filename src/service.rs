//! Task service: the create/list/get/update/delete semantics.
//!
//! Each [`TaskService`] wraps a single storage session and performs one unit
//! of work at a time. Absence is a value here ([`Option::None`] / `false`),
//! never an error; only storage failures propagate as [`StoreError`].

use chrono::Utc;
use serde::{Deserialize, Deserializer};

use crate::db::{Session, StoreError};
use crate::task::{Task, TaskStatus};

/// Input for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Input for a partial update.
///
/// Every field tracks presence: a field omitted from the request is `None`
/// and leaves the stored value untouched. `description` additionally
/// distinguishes an explicit `null` (`Some(None)`, a clear) from omission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Maps a present-but-null field to `Some(None)` instead of `None`, so an
/// explicit clear survives deserialization.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Translates validated input into storage operations.
pub struct TaskService {
    session: Session,
}

impl TaskService {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Create a task. `created_at` is set here; `updated_at` stays unset
    /// until the first update.
    pub fn create(&self, input: TaskCreate) -> Result<Task, StoreError> {
        self.session.insert_task(
            &input.title,
            input.description.as_deref(),
            input.status,
            Utc::now(),
        )
    }

    /// List tasks in insertion order, offset by `skip` and capped at `limit`,
    /// optionally filtered to one status.
    ///
    /// Neither `skip` nor `limit` is capped server-side; callers may request
    /// arbitrarily large pages.
    pub fn list(
        &self,
        skip: i64,
        limit: i64,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, StoreError> {
        self.session.select_tasks(skip, limit, status)
    }

    /// Look up a single task; `None` signals that the id is unknown.
    pub fn get(&self, id: i64) -> Result<Option<Task>, StoreError> {
        self.session.select_task(id)
    }

    /// Apply exactly the supplied fields to an existing task and stamp
    /// `updated_at`. `None` signals that the id is unknown.
    pub fn update(&self, id: i64, input: TaskUpdate) -> Result<Option<Task>, StoreError> {
        let Some(mut task) = self.session.select_task(id)? else {
            return Ok(None);
        };

        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(description) = input.description {
            task.description = description;
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        task.updated_at = Some(Utc::now());

        self.session.update_task(&task)?;
        Ok(Some(task))
    }

    /// Remove a task; `false` signals that the id was unknown.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.session.delete_task(id)
    }
}
