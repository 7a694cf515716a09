//! Task API endpoints.
//!
//! Provides endpoints for managing tasks:
//! - List tasks (with status filter and skip/limit window)
//! - Create task
//! - Get task details
//! - Update task (partial)
//! - Delete task

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::service::{TaskCreate, TaskService, TaskUpdate};
use crate::task::{Task, TaskStatus};

use super::routes::AppState;
use super::ApiError;

/// Create task routes, nested under `/tasks`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/", post(create_task))
        .route("/:id", get(get_task))
        .route("/:id", put(update_task))
        .route("/:id", delete(delete_task))
}

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response Types
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for `GET /tasks/`.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

fn default_limit() -> i64 {
    100
}

/// Read shape: a task as returned to clients.
#[derive(Debug, Serialize)]
pub struct TaskRead {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Task> for TaskRead {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status: t.status,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /tasks/ - Create a new task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TaskCreate>,
) -> Result<Json<TaskRead>, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::Invalid("title must not be empty".to_string()));
    }

    let service = TaskService::new(state.db.session()?);
    let task = service.create(input)?;

    tracing::info!("Created task {} ({})", task.id, task.title);

    Ok(Json(task.into()))
}

/// GET /tasks/ - List tasks.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskRead>>, ApiError> {
    let service = TaskService::new(state.db.session()?);
    let tasks = service.list(query.skip, query.limit, query.status)?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// GET /tasks/:id - Get task details.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<TaskRead>, ApiError> {
    let service = TaskService::new(state.db.session()?);
    service
        .get(id)?
        .map(|t| Json(t.into()))
        .ok_or(ApiError::NotFound)
}

/// PUT /tasks/:id - Apply a partial update to a task.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<TaskUpdate>,
) -> Result<Json<TaskRead>, ApiError> {
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(ApiError::Invalid("title must not be empty".to_string()));
        }
    }

    let service = TaskService::new(state.db.session()?);
    let task = service.update(id, input)?.ok_or(ApiError::NotFound)?;

    tracing::info!("Updated task {}", task.id);

    Ok(Json(task.into()))
}

/// DELETE /tasks/:id - Delete a task.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let service = TaskService::new(state.db.session()?);
    if !service.delete(id)? {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted task {}", id);

    Ok(Json(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Db;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use tempfile::tempdir;

    fn state(temp: &tempfile::TempDir) -> Arc<AppState> {
        Arc::new(AppState {
            db: Db::open(temp.path().join("tasks.db")).unwrap(),
        })
    }

    fn list_query(status: Option<TaskStatus>) -> ListTasksQuery {
        ListTasksQuery {
            skip: 0,
            limit: default_limit(),
            status,
        }
    }

    #[tokio::test]
    async fn create_then_fetch_update_delete_round_trip() {
        let temp = tempdir().unwrap();
        let state = state(&temp);

        // POST /tasks/
        let Json(created) = create_task(
            State(Arc::clone(&state)),
            Json(TaskCreate {
                title: "Test Task".to_string(),
                description: Some("Test Description".to_string()),
                status: TaskStatus::Todo,
            }),
        )
        .await
        .unwrap();
        assert!(created.id > 0);
        assert!(created.updated_at.is_none());

        // GET /tasks/:id
        let Json(fetched) = get_task(State(Arc::clone(&state)), Path(created.id))
            .await
            .unwrap();
        assert_eq!(fetched.title, "Test Task");
        assert_eq!(fetched.description, Some("Test Description".to_string()));
        assert_eq!(fetched.status, TaskStatus::Todo);

        // PUT /tasks/:id
        let Json(updated) = update_task(
            State(Arc::clone(&state)),
            Path(created.id),
            Json(TaskUpdate {
                title: Some("Updated Task".to_string()),
                description: Some(Some("Updated Description".to_string())),
                status: Some(TaskStatus::InProgress),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Updated Task");
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert!(updated.updated_at.is_some());

        // DELETE /tasks/:id
        let Json(deleted) = delete_task(State(Arc::clone(&state)), Path(created.id))
            .await
            .unwrap();
        assert_eq!(deleted.message, "Task deleted successfully");

        // Subsequent GET is a 404.
        let err = get_task(State(Arc::clone(&state)), Path(created.id))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_for_get_update_delete() {
        let temp = tempdir().unwrap();
        let state = state(&temp);

        let get_err = get_task(State(Arc::clone(&state)), Path(999))
            .await
            .unwrap_err();
        assert!(matches!(get_err, ApiError::NotFound));

        let update_err = update_task(
            State(Arc::clone(&state)),
            Path(999),
            Json(TaskUpdate::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(update_err, ApiError::NotFound));

        let delete_err = delete_task(State(Arc::clone(&state)), Path(999))
            .await
            .unwrap_err();
        assert!(matches!(delete_err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let temp = tempdir().unwrap();
        let state = state(&temp);

        let Json(created) = create_task(
            State(Arc::clone(&state)),
            Json(TaskCreate {
                title: "once".to_string(),
                description: None,
                status: TaskStatus::default(),
            }),
        )
        .await
        .unwrap();

        delete_task(State(Arc::clone(&state)), Path(created.id))
            .await
            .unwrap();
        let err = delete_task(State(Arc::clone(&state)), Path(created.id))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_storage() {
        let temp = tempdir().unwrap();
        let state = state(&temp);

        let err = create_task(
            State(Arc::clone(&state)),
            Json(TaskCreate {
                title: "   ".to_string(),
                description: None,
                status: TaskStatus::default(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));

        // Nothing reached storage.
        let Json(tasks) = list_tasks(State(Arc::clone(&state)), Query(list_query(None)))
            .await
            .unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn list_honors_status_filter() {
        let temp = tempdir().unwrap();
        let state = state(&temp);

        for status in [TaskStatus::Todo, TaskStatus::Done] {
            create_task(
                State(Arc::clone(&state)),
                Json(TaskCreate {
                    title: "t".to_string(),
                    description: None,
                    status,
                }),
            )
            .await
            .unwrap();
        }

        let Json(all) = list_tasks(State(Arc::clone(&state)), Query(list_query(None)))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let Json(done) = list_tasks(
            State(Arc::clone(&state)),
            Query(list_query(Some(TaskStatus::Done))),
        )
        .await
        .unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].status, TaskStatus::Done);
    }

    #[test]
    fn list_query_defaults_match_the_contract() {
        let query: ListTasksQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
        assert!(query.status.is_none());
    }
}
