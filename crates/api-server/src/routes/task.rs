//! Task API endpoints
//!
//! RESTful API for listing, creating, updating and soft-deleting tasks.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use todo_core::task::{TaskInput, TaskView};
use todo_core::Error;

use crate::state::AppState;

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub status_code: u16,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct TaskActionResponse {
    pub status_code: u16,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a core error to a response. `store_status` is used for failures of
/// the backing store, which differ between reads and writes.
fn error_response(err: Error, store_status: StatusCode) -> ApiError {
    let (status, detail) = match err {
        Error::TaskNotFound(_) => (StatusCode::NOT_FOUND, "Task does not exist".to_string()),
        Error::MalformedId(reason) => (
            StatusCode::NOT_FOUND,
            format!("Task does not exist: invalid id {}", reason),
        ),
        Error::InvalidInput(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason),
        err => {
            tracing::error!("Task store failure: {}", err);
            (store_status, format!("Some error occurred: {}", err))
        }
    };

    (
        status,
        Json(ErrorResponse {
            status_code: status.as_u16(),
            detail,
        }),
    )
}

/// Report an unreadable request body with the same error shape as the
/// handlers use
fn rejection_response(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    (
        status,
        Json(ErrorResponse {
            status_code: status.as_u16(),
            detail: rejection.body_text(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - List all tasks that have not been deleted
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskView>>, ApiError> {
    let tasks = state
        .task_service()
        .list_active()
        .await
        .map_err(|e| error_response(e, StatusCode::SERVICE_UNAVAILABLE))?;

    Ok(Json(tasks))
}

/// POST / - Create a new task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<CreateTaskResponse>, ApiError> {
    let Json(req) = payload.map_err(rejection_response)?;
    req.validate()
        .map_err(|e| error_response(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    let id = state
        .task_service()
        .create(req)
        .await
        .map_err(|e| error_response(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(CreateTaskResponse {
        status_code: StatusCode::OK.as_u16(),
        id: id.to_hex(),
    }))
}

/// GET /{task_id} - Get a single active task
async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .task_service()
        .get_active(&task_id)
        .await
        .map_err(|e| error_response(e, StatusCode::SERVICE_UNAVAILABLE))?;

    Ok(Json(task))
}

/// PUT /{task_id} - Replace the fields of a task
async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<TaskActionResponse>, ApiError> {
    let Json(req) = payload.map_err(rejection_response)?;
    req.validate()
        .map_err(|e| error_response(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    let id = state
        .task_service()
        .update(&task_id, req)
        .await
        .map_err(|e| error_response(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(TaskActionResponse {
        status_code: StatusCode::OK.as_u16(),
        id: id.to_hex(),
        message: "Task updated successfully".to_string(),
    }))
}

/// DELETE /{task_id} - Soft-delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskActionResponse>, ApiError> {
    let id = state
        .task_service()
        .delete(&task_id)
        .await
        .map_err(|e| error_response(e, StatusCode::INTERNAL_SERVER_ERROR))?;

    Ok(Json(TaskActionResponse {
        status_code: StatusCode::OK.as_u16(),
        id: id.to_hex(),
        message: "Task deleted successfully".to_string(),
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
