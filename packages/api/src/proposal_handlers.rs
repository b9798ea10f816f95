// ABOUTME: HTTP request handlers for proposals
// ABOUTME: Generation, read-scoped listing and lookup, owner-only update and delete, and document export

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use proposer_generator::GenerateProposalRequest;
use proposer_proposals::{export_proposal, ExportFormat, ProposalPatch};

use super::auth::CurrentUser;
use super::error::{ApiResult, AppError};
use super::response::{created, ok};
use super::state::AppState;

/// List proposals visible to the caller
pub async fn list_proposals(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<impl IntoResponse> {
    info!("Listing proposals for user: {}", user.0.id);

    let proposals = state
        .proposals
        .list_proposals(&user.caller())
        .await
        .map_err(|e| AppError::from_storage(e, "Proposal"))?;

    Ok(ok(proposals))
}

/// Get a proposal by ID
pub async fn get_proposal(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(proposal_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!("Getting proposal: {}", proposal_id);

    let proposal = state
        .proposals
        .get_proposal(&user.caller(), &proposal_id)
        .await
        .map_err(|e| AppError::from_storage(e, "Proposal"))?;

    Ok(ok(proposal))
}

/// Generate a proposal with the text generator and store it as a draft
pub async fn generate_proposal(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<GenerateProposalRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    info!(
        "Generating proposal for client '{}' (user: {})",
        request.client_name, user.0.id
    );

    let proposal = state.generator.generate(&user.caller(), request).await?;

    Ok(created(proposal))
}

/// Partially update a proposal
pub async fn update_proposal(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(proposal_id): Path<String>,
    payload: Result<Json<ProposalPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(patch) = payload?;
    info!("Updating proposal: {}", proposal_id);

    patch.validate()?;

    let proposal = state
        .proposals
        .update_proposal(&user.caller(), &proposal_id, patch)
        .await
        .map_err(|e| AppError::from_storage(e, "Proposal"))?;

    Ok(ok(proposal))
}

/// Delete a proposal
pub async fn delete_proposal(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(proposal_id): Path<String>,
) -> ApiResult<StatusCode> {
    info!("Deleting proposal: {}", proposal_id);

    state
        .proposals
        .delete_proposal(&user.caller(), &proposal_id)
        .await
        .map_err(|e| AppError::from_storage(e, "Proposal"))?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// Download a proposal as Markdown or HTML
pub async fn export_proposal_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(proposal_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let format = match query.format.as_deref() {
        Some(raw) => raw
            .parse::<ExportFormat>()
            .map_err(|e| AppError::validation("format", e.to_string()))?,
        None => ExportFormat::default(),
    };
    info!("Exporting proposal {} as {}", proposal_id, format);

    let proposal = state
        .proposals
        .get_proposal(&user.caller(), &proposal_id)
        .await
        .map_err(|e| AppError::from_storage(e, "Proposal"))?;

    let document = export_proposal(&proposal, format);
    let disposition = format!("attachment; filename=\"{}\"", document.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.body,
    ))
}
