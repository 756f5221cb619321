//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewUser, Page, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for user records.
///
/// Identifiers default to `gen_random_uuid()` on insert. Upsert is a single
/// `INSERT ... ON CONFLICT` statement, so concurrent upserts of the same id
/// never produce two rows.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    login: String,
    first_name: String,
    last_name: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User::new(r.id, r.login, r.first_name, r.last_name)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login, first_name, last_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_page(&self, page_number: u32, page_size: u32) -> Result<Page<User>, AppError> {
        let offset = Page::<User>::offset(page_number, page_size) as i64;

        let rows_query = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login, first_name, last_name
            FROM users
            ORDER BY login COLLATE "C", id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(self.pool.as_ref());

        let count_query =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users").fetch_one(self.pool.as_ref());

        let (rows, total_count) = tokio::try_join!(rows_query, count_query)?;

        Ok(Page::new(
            rows.into_iter().map(User::from).collect(),
            total_count.max(0) as u64,
            page_number,
            page_size,
        ))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (login, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, login, first_name, last_name
            "#,
        )
        .bind(new_user.login)
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, user: User) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                login      = $2,
                first_name = $3,
                last_name  = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(user.login)
        .bind(user.first_name)
        .bind(user.last_name)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": user.id }),
            ));
        }

        Ok(())
    }

    async fn upsert(&self, user: User) -> Result<bool, AppError> {
        // xmax is zero only for a row version created by this statement's INSERT.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO users (id, login, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                login      = EXCLUDED.login,
                first_name = EXCLUDED.first_name,
                last_name  = EXCLUDED.last_name
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(user.id)
        .bind(user.login)
        .bind(user.first_name)
        .bind(user.last_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(inserted)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
