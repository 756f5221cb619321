//! User management service.

use std::sync::Arc;

use crate::domain::entities::{NewUser, Page, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;
use uuid::Uuid;

/// Service for reading and writing user records.
///
/// Applies the not-found policy on top of the repository and logs every
/// write. Input validation happens before a call reaches this service.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Retrieves one page of users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_users(&self, page_number: u32, page_size: u32) -> Result<Page<User>, AppError> {
        let page = self.repository.get_page(page_number, page_size).await?;
        tracing::debug!(
            page_number,
            page_size,
            total_count = page.total_count,
            returned = page.items.len(),
            "Listed users"
        );
        Ok(page)
    }

    /// Inserts a new user and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the login is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = self.repository.insert(new_user).await?;
        tracing::info!(user_id = %user.id, login = %user.login, "User created");
        Ok(user)
    }

    /// Updates the user with `user.id` or creates it under that identifier.
    ///
    /// Returns `true` when a new record was created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for the nil identifier.
    /// Returns [`AppError::Conflict`] if the login is taken by another user.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn upsert_user(&self, user: User) -> Result<bool, AppError> {
        if user.id.is_nil() {
            return Err(AppError::bad_request(
                "User id must not be empty",
                json!({ "id": user.id }),
            ));
        }

        let id = user.id;
        let created = self.repository.upsert(user).await?;
        if created {
            tracing::info!(user_id = %id, "User created by upsert");
        } else {
            tracing::info!(user_id = %id, "User replaced");
        }
        Ok(created)
    }

    /// Loads a user, transforms it with `apply` and stores the result.
    ///
    /// The repository is written only when `apply` succeeds; the identifier of
    /// the returned user is forced back to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Propagates any error returned by `apply`.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn patch_user<F>(&self, id: Uuid, apply: F) -> Result<User, AppError>
    where
        F: FnOnce(&User) -> Result<User, AppError>,
    {
        let current = self.get_user(id).await?;

        let mut patched = apply(&current)?;
        patched.id = id;

        self.repository.update(patched.clone()).await?;
        tracing::info!(user_id = %id, "User patched");
        Ok(patched)
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.get_user(id).await?;
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Checks that the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}
