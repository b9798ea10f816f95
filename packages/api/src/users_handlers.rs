// ABOUTME: HTTP request handlers for user operations
// ABOUTME: Registration plus reading and updating the caller's own profile

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use proposer_users::{UserCreateInput, UserProfileUpdate};

use super::auth::CurrentUser;
use super::error::{ApiResult, AppError};
use super::response::{created, ok};
use super::state::AppState;

/// Register a new user
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<UserCreateInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    info!("Registering user: {}", input.username);

    input.validate()?;

    let user = state
        .users
        .create_user(input)
        .await
        .map_err(|e| AppError::from_storage(e, "User"))?;

    Ok(created(user))
}

/// Get the authenticated user
pub async fn get_current_user(user: CurrentUser) -> ApiResult<impl IntoResponse> {
    info!("Getting current user: {}", user.0.id);
    Ok(ok(user.0))
}

/// Update profile fields of the authenticated user
pub async fn update_current_user(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<UserProfileUpdate>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(update) = payload?;
    info!("Updating profile for user: {}", user.0.id);

    update.validate()?;

    let updated = state
        .users
        .update_profile(&user.0.id, update)
        .await
        .map_err(|e| AppError::from_storage(e, "User"))?;

    Ok(ok(updated))
}
