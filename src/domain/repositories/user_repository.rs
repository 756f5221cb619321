//! Repository trait for user storage.

use crate::domain::entities::{NewUser, Page, User};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for user records.
///
/// Owns identifier assignment and uniqueness (both `id` and `login`), and its
/// own concurrency discipline. Callers issue at most one sequence of calls per
/// request and never lock around them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUserRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Fetches one page of users ordered by login.
    ///
    /// `page_number` is 1-based; both arguments are expected to be clamped by
    /// the caller. A page past the end yields no items but the real total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_page(&self, page_number: u32, page_size: u32) -> Result<Page<User>, AppError>;

    /// Inserts a new user, assigning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the login is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Overwrites an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this identifier.
    /// Returns [`AppError::Conflict`] if the login is taken by another user.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, user: User) -> Result<(), AppError>;

    /// Updates the user with `user.id`, or inserts it under that identifier.
    ///
    /// Returns `true` when a new record was created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the login is taken by another user.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn upsert(&self, user: User) -> Result<bool, AppError>;

    /// Removes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this identifier.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
