use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Number of tasks per page when the client does not ask for a size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Represents the column a task sits in on the board.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Completed,
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(AppError::ValidationError(format!(
                "`{}` is not a valid status (pending, in-progress, completed)",
                other
            ))),
        }
    }
}

/// Parses an optional raw status from a request body.
fn parse_status(raw: Option<&str>) -> Result<Option<TaskStatus>, AppError> {
    raw.map(str::parse::<TaskStatus>).transpose()
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Timestamp of when the task was created. Listing follows this order.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: String, description: String, status: TaskStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a task.
///
/// Fields are optional strings at the serde level so that a missing field or an
/// unknown status is reported as a validation error rather than a decode error.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,
    /// Defaults to `pending` when omitted.
    pub status: Option<String>,
}

impl TaskInput {
    /// Validates the payload and turns it into a new `Task`.
    pub fn into_task(self) -> Result<Task, AppError> {
        self.validate()?;
        let status = parse_status(self.status.as_deref())?.unwrap_or_default();
        match (self.title, self.description) {
            (Some(title), Some(description)) => Ok(Task::new(title, description, status)),
            _ => Err(AppError::ValidationError(
                "title and description are required".into(),
            )),
        }
    }
}

/// Body of `PUT /todo/task/{id}`: any subset of the task's fields.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TaskUpdate {
    /// Validates the payload and resolves it into typed changes.
    pub fn into_changes(self) -> Result<TaskChanges, AppError> {
        self.validate()?;
        Ok(TaskChanges {
            status: parse_status(self.status.as_deref())?,
            title: self.title,
            description: self.description,
        })
    }
}

/// Validated partial update of a task. Absent fields are left untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Applies the present fields to `task` and bumps `updated_at`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        task.updated_at = Utc::now();
    }
}

/// Raw `?page=&limit=` query parameters.
///
/// Kept as strings: anything missing, unparseable or below one falls back to
/// the defaults instead of rejecting the request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page number.
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of tasks to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl From<&TaskQuery> for Pagination {
    fn from(query: &TaskQuery) -> Self {
        fn positive(value: Option<&str>, fallback: i64) -> i64 {
            value
                .and_then(|raw| raw.trim().parse::<i64>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(fallback)
        }

        Self::new(
            positive(query.page.as_deref(), 1),
            positive(query.limit.as_deref(), DEFAULT_PAGE_SIZE),
        )
    }
}
