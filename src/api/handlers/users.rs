//! Handlers for the user resource.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{PaginationMetadata, PaginationParams};
use crate::api::dto::patch::PatchDocument;
use crate::api::dto::user::{CreateUserDto, PutUserDto, UpdateUserDto, UserDto};
use crate::api::extract::{JsonBody, parse_user_id};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::media_type::negotiated_content_type;

/// Name of the header carrying [`PaginationMetadata`].
pub const X_PAGINATION: &str = "x-pagination";

/// Methods advertised by `OPTIONS /api/users`.
pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Retrieves a single user.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request if `id` is not a UUID.
/// Returns 404 Not Found if the user does not exist.
pub async fn get_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserDto>, AppError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get_user(id).await?;

    Ok(Json(user.into()))
}

/// Probes a single user without transferring it.
///
/// # Endpoint
///
/// `HEAD /api/users/{id}`
///
/// The response has no body. `Content-Type` announces the representation a
/// `GET` would be asked for: `application/xml` when `Accept` mentions XML,
/// `application/json` otherwise.
///
/// # Errors
///
/// Returns 400 Bad Request if `id` is not a UUID.
/// Returns 404 Not Found if the user does not exist.
pub async fn head_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = parse_user_id(&id)?;
    state.user_service.get_user(id).await?;

    let content_type = negotiated_content_type(&headers);

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)]).into_response())
}

/// Lists users one page at a time.
///
/// # Endpoint
///
/// `GET /api/users?pageNumber=&pageSize=`
///
/// # Query Parameters
///
/// - `pageNumber` (optional): 1-based page (default: 1, values below 1 become 1)
/// - `pageSize` (optional): items per page (default: 10, clamped to 1..=20)
///
/// # Response
///
/// The body is the array of users on the page. Navigation data travels in
/// the `X-Pagination` header:
///
/// ```json
/// {
///   "previousPageLink": null,
///   "nextPageLink": "/api/users?pageNumber=2&pageSize=10",
///   "totalCount": 42,
///   "pageSize": 10,
///   "currentPage": 1,
///   "totalPages": 5
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if a query parameter is not an integer.
pub async fn list_users_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = query.map_err(|e| {
        AppError::bad_request("Invalid pagination parameters", json!({ "reason": e.body_text() }))
    })?;

    let (page_number, page_size) = params.clamped();
    let page = state.user_service.list_users(page_number, page_size).await?;

    let metadata = PaginationMetadata::from_page(&page, &state.links);
    let header_value = serde_json::to_string(&metadata)
        .ok()
        .and_then(|s| HeaderValue::from_str(&s).ok())
        .ok_or_else(|| AppError::internal("Failed to encode pagination header", json!({})))?;

    let items: Vec<UserDto> = page.items.into_iter().map(UserDto::from).collect();

    Ok(([(X_PAGINATION, header_value)], Json(items)).into_response())
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// { "login": "johndoe375", "firstName": "John", "lastName": "Doe" }
/// ```
///
/// # Response
///
/// 201 Created, `Location: /api/users/{id}`, body is the new id as a JSON string.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is absent or malformed.
/// Returns 409 Conflict if the login is already taken.
/// Returns 422 Unprocessable Entity with field errors if validation fails.
pub async fn create_user_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserDto>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let user = state.user_service.create_user(payload.into()).await?;
    let location = state.links.user(user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user.id)).into_response())
}

/// Replaces a user, creating it under the given id if it does not exist.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// # Response
///
/// - 201 Created with `Location` and the id as body when the user was new
/// - 204 No Content when an existing user was replaced
///
/// # Errors
///
/// Returns 400 Bad Request if the body is absent or malformed, or if `id` is
/// not a UUID or is the nil UUID.
/// Returns 409 Conflict if the login belongs to another user.
/// Returns 422 Unprocessable Entity with field errors if validation fails.
pub async fn upsert_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PutUserDto>,
) -> Result<Response, AppError> {
    let id = parse_user_id(&id)?;
    payload.validate()?;

    let created = state.user_service.upsert_user(payload.into_user(id)).await?;

    if created {
        let location = state.links.user(id);
        Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(id)).into_response())
    } else {
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

/// Applies a JSON Patch document to a user.
///
/// # Endpoint
///
/// `PATCH /api/users/{id}`
///
/// # Request Body
///
/// ```json
/// [ { "op": "replace", "path": "/firstName", "value": "Johnny" } ]
/// ```
///
/// The document is applied to the user's patchable projection (`firstName`,
/// `lastName`) and the whole projection is validated again before anything
/// is stored.
///
/// # Errors
///
/// Returns 400 Bad Request if the document is absent or malformed.
/// Returns 404 Not Found if the user does not exist.
/// Returns 422 Unprocessable Entity if an operation cannot be applied or the
/// patched user is invalid; nothing is stored in that case.
pub async fn patch_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(document): JsonBody<PatchDocument>,
) -> Result<StatusCode, AppError> {
    let id = parse_user_id(&id)?;

    state
        .user_service
        .patch_user(id, |user| {
            let mut dto = UpdateUserDto::from(user);
            document.apply_to(&mut dto)?;
            dto.validate()?;
            Ok(dto.apply_to(user))
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request if `id` is not a UUID.
/// Returns 404 Not Found if the user does not exist.
pub async fn delete_user_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_user_id(&id)?;
    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Advertises the methods supported on the collection.
///
/// # Endpoint
///
/// `OPTIONS /api/users`
pub async fn users_options_handler() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}
