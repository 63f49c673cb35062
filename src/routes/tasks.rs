use crate::{
    auth::{AuthenticatedUser, RequireRole},
    error::AppError,
    models::{Pagination, Role, Task, TaskInput, TaskQuery, TaskUpdate},
    state::AppState,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body returned after creating a task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskCreated {
    pub message: String,
    pub task: Task,
}

/// Body returned when listing tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
}

/// Body returned after updating a task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskUpdated {
    pub message: String,
    #[serde(rename = "updatedTask")]
    pub updated_task: Task,
}

/// Body returned after deleting a task.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDeleted {
    pub message: String,
    #[serde(rename = "deletedTask")]
    pub deleted_task: Task,
}

/// Creates a new task.
///
/// ## Request Body:
/// - `title`: required, non-empty.
/// - `description`: required, non-empty.
/// - `status` (optional): `pending` (default), `in-progress` or `completed`.
///
/// ## Responses:
/// - `201 Created`: `{message, task}`.
/// - `401 Unauthorized`: missing, invalid or revoked token.
/// - `500 Internal Server Error`: missing fields, an unknown status or a store failure.
#[post("/task")]
pub async fn create_task(
    state: web::Data<AppState>,
    payload: web::Json<TaskInput>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = payload.into_inner().into_task()?;
    state.tasks.insert_task(&task).await?;

    log::info!("task {} created by {}", task.id, caller.0.sub);

    Ok(HttpResponse::Created().json(TaskCreated {
        message: "Task has been added successfully".into(),
        task,
    }))
}

/// Retrieves one page of tasks in storage order.
///
/// ## Query Parameters:
/// - `page` (optional): one-based page number, defaults to 1.
/// - `limit` (optional): page size, defaults to 10.
///
/// ## Responses:
/// - `200 OK`: `{tasks}`.
/// - `401 Unauthorized`: missing, invalid or revoked token.
/// - `404 Not Found`: the requested page is empty.
/// - `500 Internal Server Error`: store failure.
#[get("/task")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let pagination = Pagination::from(&*query);
    let tasks = state.tasks.list_tasks(pagination).await?;

    if tasks.is_empty() {
        return Err(AppError::NotFound("No tasks found".into()));
    }

    Ok(HttpResponse::Ok().json(TaskPage { tasks }))
}

/// Updates any subset of a task's title, description and status.
///
/// ## Responses:
/// - `200 OK`: `{message, updatedTask}`.
/// - `401 Unauthorized`: missing, invalid or revoked token.
/// - `404 Not Found`: no task with this id.
/// - `500 Internal Server Error`: an empty title/description, an unknown status
///   or a store failure.
#[put("/task/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    payload: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let changes = payload.into_inner().into_changes()?;

    let updated_task = state
        .tasks
        .update_task(task_id.into_inner(), &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(TaskUpdated {
        message: "Task updated successfully".into(),
        updated_task,
    }))
}

/// Deletes a task. Admin only.
///
/// The role check runs before this handler, so a non-admin caller is refused
/// whether or not the task exists.
///
/// ## Responses:
/// - `200 OK`: `{message, deletedTask}`.
/// - `401 Unauthorized`: missing, invalid or revoked token.
/// - `403 Forbidden`: the caller is not an admin.
/// - `404 Not Found`: no task with this id.
/// - `500 Internal Server Error`: store failure.
#[delete("/task/{id}", wrap = "RequireRole::new(Role::Admin)")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let deleted_task = state
        .tasks
        .delete_task(task_id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    log::info!("task {} deleted by {}", deleted_task.id, caller.0.sub);

    Ok(HttpResponse::Ok().json(TaskDeleted {
        message: "Task deleted successfully".into(),
        deleted_task,
    }))
}
