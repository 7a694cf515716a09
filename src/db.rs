//! SQLite storage: session factory and row-level task operations.
//!
//! [`Db`] is the process-wide factory; each request opens its own
//! [`Session`] (a plain connection) and drops it when the request completes,
//! so no connection ever outlives the unit of work it serves.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::task::{Task, TaskStatus};

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'todo'
        CHECK (status IN ('todo', 'in_progress', 'done')),
    created_at TEXT NOT NULL,
    updated_at TEXT
)";

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, status, created_at)
    VALUES (?1, ?2, ?3, ?4) RETURNING id";
const SELECT_TASK: &str = "SELECT id, title, description, status, created_at, updated_at
    FROM tasks WHERE id = ?1";
const SELECT_TASKS: &str = "SELECT id, title, description, status, created_at, updated_at
    FROM tasks ORDER BY id LIMIT ?1 OFFSET ?2";
const SELECT_TASKS_BY_STATUS: &str = "SELECT id, title, description, status, created_at, updated_at
    FROM tasks WHERE status = ?1 ORDER BY id LIMIT ?2 OFFSET ?3";
const UPDATE_TASK: &str = "UPDATE tasks
    SET title = ?1, description = ?2, status = ?3, updated_at = ?4 WHERE id = ?5";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Storage-layer failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Factory for request-scoped storage sessions.
///
/// `open` verifies connectivity and creates the schema once at startup;
/// after that the factory only hands out fresh connections.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    /// Open the database at `path`, creating the file and schema if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute(SCHEMA_TASKS, [])?;
        tracing::info!("Database ready at {}", path.display());

        Ok(Self { path })
    }

    /// Open a fresh session for one unit of work.
    pub fn session(&self) -> Result<Session, StoreError> {
        Ok(Session {
            conn: Connection::open(&self.path)?,
        })
    }
}

/// A single storage session wrapping one SQLite connection.
///
/// The connection closes when the session is dropped, on every exit path.
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Insert a new task row and return the persisted record with its id.
    pub fn insert_task(
        &self,
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Task, StoreError> {
        let id: i64 = self.conn.query_row(
            INSERT_TASK,
            params![title, description, status.as_str(), created_at],
            |row| row.get(0),
        )?;

        Ok(Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            status,
            created_at,
            updated_at: None,
        })
    }

    /// Fetch one task by id; `None` when no row matches.
    pub fn select_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let task = self
            .conn
            .query_row(SELECT_TASK, params![id], task_from_row)
            .optional()?;
        Ok(task)
    }

    /// Fetch tasks in insertion order, windowed by `limit`/`skip` and
    /// optionally filtered to one status.
    pub fn select_tasks(
        &self,
        skip: i64,
        limit: i64,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, StoreError> {
        let mut stmt;
        let rows = match status {
            Some(status) => {
                stmt = self.conn.prepare(SELECT_TASKS_BY_STATUS)?;
                stmt.query_map(params![status.as_str(), limit, skip], task_from_row)?
            }
            None => {
                stmt = self.conn.prepare(SELECT_TASKS)?;
                stmt.query_map(params![limit, skip], task_from_row)?
            }
        };

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    /// Persist modified fields of an existing task row.
    pub fn update_task(&self, task: &Task) -> Result<(), StoreError> {
        self.conn.execute(
            UPDATE_TASK,
            params![
                task.title,
                task.description,
                task.status.as_str(),
                task.updated_at,
                task.id
            ],
        )?;
        Ok(())
    }

    /// Delete one task row; `false` when no row matched.
    pub fn delete_task(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(affected > 0)
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status_raw: String = row.get(3)?;
    let status = TaskStatus::parse(&status_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown task status: {status_raw}").into(),
        )
    })?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_schema_and_sessions_share_data() {
        let temp = tempdir().unwrap();
        let db = Db::open(temp.path().join("tasks.db")).unwrap();

        let writer = db.session().unwrap();
        let task = writer
            .insert_task("first", None, TaskStatus::Todo, Utc::now())
            .unwrap();

        // A separate session sees the committed row.
        let reader = db.session().unwrap();
        let found = reader.select_task(task.id).unwrap().unwrap();
        assert_eq!(found, task);
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("data/store/tasks.db");
        let db = Db::open(&nested).unwrap();
        assert!(nested.exists());
        db.session().unwrap();
    }

    #[test]
    fn delete_reports_whether_a_row_matched() {
        let temp = tempdir().unwrap();
        let db = Db::open(temp.path().join("tasks.db")).unwrap();
        let session = db.session().unwrap();

        let task = session
            .insert_task("doomed", None, TaskStatus::Todo, Utc::now())
            .unwrap();
        assert!(session.delete_task(task.id).unwrap());
        assert!(!session.delete_task(task.id).unwrap());
    }
}
