//! API route configuration.

use crate::api::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, head_user_handler,
    list_users_handler, patch_user_handler, upsert_user_handler, users_options_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public path of the user collection, used when building links.
pub const USERS_PATH: &str = "/api/users";

/// User resource routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET     /users`        - List users (paginated, `X-Pagination` header)
/// - `POST    /users`        - Create a user
/// - `OPTIONS /users`        - Allowed methods
/// - `GET     /users/{id}`   - Retrieve a user
/// - `HEAD    /users/{id}`   - Existence probe with negotiated `Content-Type`
/// - `PUT     /users/{id}`   - Replace or create a user
/// - `PATCH   /users/{id}`   - Apply a JSON Patch document
/// - `DELETE  /users/{id}`   - Delete a user
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(list_users_handler)
                .post(create_user_handler)
                .options(users_options_handler),
        )
        .route(
            "/users/{id}",
            get(get_user_handler)
                .head(head_user_handler)
                .put(upsert_user_handler)
                .patch(patch_user_handler)
                .delete(delete_user_handler),
        )
}
