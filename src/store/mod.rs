//! Persistence for users, tasks and revoked tokens.
//!
//! Each collection is an async trait so that route handlers and the access gate
//! only see `Arc<dyn ...>` handles. [`PgStore`] keeps everything in PostgreSQL;
//! [`MemoryStore`] keeps it in the process and backs the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Pagination, RevokedToken, Task, TaskChanges, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Message used when an email is already registered.
pub const DUPLICATE_EMAIL: &str = "Email already registered";

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::Conflict` when the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Task store.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &Task) -> Result<(), AppError>;

    /// Returns one page of tasks in storage (creation) order.
    async fn list_tasks(&self, pagination: Pagination) -> Result<Vec<Task>, AppError>;

    /// Applies `changes` and returns the updated task, or `None` if `id` is unknown.
    async fn update_task(&self, id: Uuid, changes: &TaskChanges)
        -> Result<Option<Task>, AppError>;

    /// Removes a task and returns it, or `None` if `id` is unknown.
    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;
}

/// Revocation list.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Records a revoked token. Revoking the same token twice is not an error.
    async fn revoke(&self, revoked: &RevokedToken) -> Result<(), AppError>;

    /// Exact-string lookup of a raw token.
    async fn is_revoked(&self, token: &str) -> Result<bool, AppError>;
}
