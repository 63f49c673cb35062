use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RevocationStore, TaskStore, UserStore, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::models::{Pagination, RevokedToken, Task, TaskChanges, User};

const TASK_COLUMNS: &str = "id, title, description, status, created_at, updated_at";

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("database migrations applied");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, role, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(DUPLICATE_EMAIL.into()),
            other => other,
        })?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO tasks (id, title, description, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_tasks(&self, pagination: Pagination) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks ORDER BY created_at, id LIMIT $1 OFFSET $2",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks
             SET title = COALESCE($1, title),
                 description = COALESCE($2, description),
                 status = COALESCE($3, status),
                 updated_at = NOW()
             WHERE id = $4
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!("DELETE FROM tasks WHERE id = $1 RETURNING {}", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }
}

#[async_trait]
impl RevocationStore for PgStore {
    async fn revoke(&self, revoked: &RevokedToken) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO revoked_tokens (token, revoked_at) VALUES ($1, $2)
             ON CONFLICT (token) DO NOTHING",
        )
        .bind(&revoked.token)
        .bind(revoked.revoked_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, AppError> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE token = $1)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await?;
        Ok(revoked)
    }
}
