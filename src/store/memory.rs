use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RevocationStore, TaskStore, UserStore, DUPLICATE_EMAIL};
use crate::error::AppError;
use crate::models::{Pagination, RevokedToken, Task, TaskChanges, User};

/// Keeps users, tasks and revoked tokens in process memory.
///
/// Tasks are kept in insertion order, which is the order listing returns.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.write().await.push(task.clone());
        Ok(())
    }

    async fn list_tasks(&self, pagination: Pagination) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let skip = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit).unwrap_or(usize::MAX);
        Ok(tasks.iter().skip(skip).take(take).cloned().collect())
    }

    async fn update_task(
        &self,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|task| task.id == id).map(|task| {
            changes.apply_to(task);
            task.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .iter()
            .position(|task| task.id == id)
            .map(|index| tasks.remove(index)))
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    async fn revoke(&self, revoked: &RevokedToken) -> Result<(), AppError> {
        self.revoked
            .write()
            .await
            .entry(revoked.token.clone())
            .or_insert(revoked.revoked_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.revoked.read().await.contains_key(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, TaskStatus};
    use pretty_assertions::assert_eq;

    fn task(title: &str) -> Task {
        Task::new(title.into(), format!("{} description", title), TaskStatus::Pending)
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let user = User::new("a".into(), "a@example.com".into(), "hash".into(), Role::User);
        store.insert_user(&user).await.unwrap();

        let again = User::new("b".into(), "a@example.com".into(), "hash".into(), Role::Admin);
        assert!(matches!(
            store.insert_user(&again).await,
            Err(AppError::Conflict(_))
        ));

        let found = store.find_user_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.username, "a");
        assert!(store.find_user_by_email("b@example.com").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_tasks_page_in_insertion_order() {
        let store = MemoryStore::new();
        for i in 0..12 {
            store.insert_task(&task(&format!("task {}", i))).await.unwrap();
        }

        let first = store.list_tasks(Pagination::new(1, 10)).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].title, "task 0");

        let second = store.list_tasks(Pagination::new(2, 10)).await.unwrap();
        let titles: Vec<_> = second.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["task 10", "task 11"]);

        assert!(store.list_tasks(Pagination::new(3, 10)).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_update_and_delete_unknown_ids() {
        let store = MemoryStore::new();
        let existing = task("keep");
        store.insert_task(&existing).await.unwrap();

        let changes = TaskChanges {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        };
        assert!(store.update_task(Uuid::new_v4(), &changes).await.unwrap().is_none());
        assert!(store.delete_task(Uuid::new_v4()).await.unwrap().is_none());

        let updated = store.update_task(existing.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);

        let deleted = store.delete_task(existing.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, existing.id);
        assert!(store.list_tasks(Pagination::default()).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_revocation_is_idempotent() {
        let store = MemoryStore::new();
        assert!(!store.is_revoked("abc").await.unwrap());

        store.revoke(&RevokedToken::new("abc")).await.unwrap();
        store.revoke(&RevokedToken::new("abc")).await.unwrap();

        assert!(store.is_revoked("abc").await.unwrap());
        assert!(!store.is_revoked("Bearer abc").await.unwrap());
    }
}
