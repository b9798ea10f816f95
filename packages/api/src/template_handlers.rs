// ABOUTME: HTTP request handlers for proposal template management
// ABOUTME: CRUD over templates, read-scoped by role and mutable only by the owner

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use proposer_templates::{TemplateCreateInput, TemplatePatch};

use super::auth::CurrentUser;
use super::error::{ApiResult, AppError};
use super::response::{created, ok};
use super::state::AppState;

/// List templates visible to the caller
pub async fn list_templates(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<impl IntoResponse> {
    info!("Listing templates for user: {}", user.0.id);

    let templates = state
        .templates
        .list_templates(&user.caller())
        .await
        .map_err(|e| AppError::from_storage(e, "Template"))?;

    Ok(ok(templates))
}

/// Get a template by ID
pub async fn get_template(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(template_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Getting template: {}", template_id);

    let template = state
        .templates
        .get_template(&user.caller(), &template_id)
        .await
        .map_err(|e| AppError::from_storage(e, "Template"))?;

    Ok(ok(template))
}

/// Create a template owned by the caller
pub async fn create_template(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<TemplateCreateInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    info!("Creating template '{}' for user: {}", input.title, user.0.id);

    input.validate()?;

    let template = state
        .templates
        .create_template(&user.caller(), input)
        .await
        .map_err(|e| AppError::from_storage(e, "Template"))?;

    Ok(created(template))
}

/// Partially update a template
pub async fn update_template(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(template_id): Path<String>,
    payload: Result<Json<TemplatePatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(patch) = payload?;
    info!("Updating template: {}", template_id);

    patch.validate()?;

    let template = state
        .templates
        .update_template(&user.caller(), &template_id, patch)
        .await
        .map_err(|e| AppError::from_storage(e, "Template"))?;

    Ok(ok(template))
}

/// Delete a template
pub async fn delete_template(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(template_id): Path<String>,
) -> ApiResult<StatusCode> {
    info!("Deleting template: {}", template_id);

    state
        .templates
        .delete_template(&user.caller(), &template_id)
        .await
        .map_err(|e| AppError::from_storage(e, "Template"))?;

    Ok(StatusCode::NO_CONTENT)
}
