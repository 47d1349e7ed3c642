//! HTTP handlers for user accounts.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::api::models::pagination::ItemsResponse;
use crate::api::models::system::ErrorResponse;
use crate::api::models::users::{ListUsersQuery, UserCreate, UserResponse};
use crate::crypto;
use crate::db::handlers::{Repository, Users, users::UserFilter};
use crate::errors::{Error, Result};

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    summary = "Register user",
    description = "Create an account. The password is stored as an Argon2 hash and never returned. Emails are not checked for uniqueness.",
    request_body = UserCreate,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 422, description = "Invalid email, password or role", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(State(state): State<AppState>, Json(create): Json<UserCreate>) -> Result<Json<UserResponse>> {
    let mut user = create.validate()?;

    // Hashing is CPU-bound; run it on the blocking pool
    let password = std::mem::take(&mut user.password);
    let password_hash = tokio::task::spawn_blocking(move || crypto::hash_password(&password))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("join password hashing task: {e}"),
        })??;

    let created = Users::new(state.store.as_ref())
        .create(&user.into_db_request(password_hash))
        .await?;
    Ok(Json(UserResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    summary = "List users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Matching users", body = ItemsResponse<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListUsersQuery>) -> Result<Json<ItemsResponse<UserResponse>>> {
    let filter = UserFilter {
        role: query.role,
        email: query.email,
        limit: query.pagination.limit(&state.config.pagination),
    };

    let users = Users::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(ItemsResponse::new(users.into_iter().map(UserResponse::from).collect())))
}
