//! Process-local user repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{NewUser, Page, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// User repository backed by a map behind a [`RwLock`].
///
/// Used when `STORAGE=memory` and by the HTTP integration tests. Enforces the
/// same uniqueness rules as the PostgreSQL schema: one row per `id` and per
/// `login`. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

fn ensure_login_free(users: &HashMap<Uuid, User>, login: &str, owner: Uuid) -> Result<(), AppError> {
    let taken = users.values().any(|u| u.login == login && u.id != owner);
    if taken {
        return Err(AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": "users_login_key" }),
        ));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_page(&self, page_number: u32, page_size: u32) -> Result<Page<User>, AppError> {
        let users = self.users.read().await;

        let mut all: Vec<&User> = users.values().collect();
        all.sort_by(|a, b| a.login.cmp(&b.login).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(Page::<User>::offset(page_number, page_size)).unwrap_or(usize::MAX);
        let items = all
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, users.len() as u64, page_number, page_size))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        let mut id = Uuid::new_v4();
        while users.contains_key(&id) {
            id = Uuid::new_v4();
        }
        ensure_login_free(&users, &new_user.login, id)?;

        let user = new_user.with_id(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<(), AppError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": user.id }),
            ));
        }
        ensure_login_free(&users, &user.login, user.id)?;

        users.insert(user.id, user);
        Ok(())
    }

    async fn upsert(&self, user: User) -> Result<bool, AppError> {
        let mut users = self.users.write().await;

        ensure_login_free(&users, &user.login, user.id)?;
        Ok(users.insert(user.id, user).is_none())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("User not found", json!({ "id": id }))),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(login: &str) -> NewUser {
        NewUser {
            login: login.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_is_findable() {
        let repo = InMemoryUserRepository::new();

        let user = repo.insert(new_user("alice")).await.unwrap();

        assert!(!user.id.is_nil());
        assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_insert_duplicate_login_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("alice")).await.unwrap();

        let result = repo.insert(new_user("alice")).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
        assert_eq!(repo.get_page(1, 10).await.unwrap().total_count, 1);
    }

    #[tokio::test]
    async fn test_get_page_orders_by_login() {
        let repo = InMemoryUserRepository::new();
        for login in ["carol", "alice", "bob", "dave", "erin"] {
            repo.insert(new_user(login)).await.unwrap();
        }

        let first = repo.get_page(1, 2).await.unwrap();
        let logins: Vec<_> = first.items.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "bob"]);
        assert_eq!(first.total_count, 5);
        assert_eq!(first.total_pages(), 3);

        let last = repo.get_page(3, 2).await.unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].login, "erin");
    }

    #[tokio::test]
    async fn test_get_page_orders_logins_bytewise() {
        let repo = InMemoryUserRepository::new();
        for login in ["alice", "Bob", "carol", "Zed"] {
            repo.insert(new_user(login)).await.unwrap();
        }

        let page = repo.get_page(1, 10).await.unwrap();
        let logins: Vec<_> = page.items.iter().map(|u| u.login.as_str()).collect();

        assert_eq!(logins, vec!["Bob", "Zed", "alice", "carol"]);
    }

    #[tokio::test]
    async fn test_get_page_past_the_end_is_empty() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("alice")).await.unwrap();

        let page = repo.get_page(5, 10).await.unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let repo = InMemoryUserRepository::new();
        let id = Uuid::new_v4();

        let created = repo
            .upsert(User::new(id, "neo".into(), "Thomas".into(), "Anderson".into()))
            .await
            .unwrap();
        assert!(created);

        let created_again = repo
            .upsert(User::new(id, "neo".into(), "Neo".into(), "Anderson".into()))
            .await
            .unwrap();
        assert!(!created_again);

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.first_name, "Neo");
    }

    #[tokio::test]
    async fn test_upsert_login_taken_by_other_user_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.insert(new_user("taken")).await.unwrap();

        let result = repo
            .upsert(User::new(Uuid::new_v4(), "taken".into(), "A".into(), "B".into()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update(User::new(Uuid::new_v4(), "x".into(), "A".into(), "B".into()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("alice")).await.unwrap();

        repo.delete(user.id).await.unwrap();

        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(user.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
