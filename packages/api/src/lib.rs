// ABOUTME: HTTP API layer for Proposer providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod chat_handlers;
pub mod error;
pub mod health;
pub mod proposal_handlers;
pub mod response;
pub mod state;
pub mod template_handlers;
pub mod users_handlers;

pub use auth::{CurrentUser, USER_ID_HEADER};
pub use error::{ApiResult, AppError};
pub use response::ApiResponse;
pub use state::AppState;

/// Creates the templates API router
pub fn create_templates_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/templates",
            get(template_handlers::list_templates).post(template_handlers::create_template),
        )
        .route(
            "/api/templates/{id}",
            get(template_handlers::get_template)
                .put(template_handlers::update_template)
                .delete(template_handlers::delete_template),
        )
}

/// Creates the proposals API router
pub fn create_proposals_router() -> Router<AppState> {
    Router::new()
        .route("/api/proposals", get(proposal_handlers::list_proposals))
        .route(
            "/api/proposals/generate",
            post(proposal_handlers::generate_proposal),
        )
        .route(
            "/api/proposals/{id}",
            get(proposal_handlers::get_proposal)
                .put(proposal_handlers::update_proposal)
                .delete(proposal_handlers::delete_proposal),
        )
        .route(
            "/api/proposals/{id}/export",
            get(proposal_handlers::export_proposal_document),
        )
}

/// Creates the users API router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(users_handlers::register_user))
        .route(
            "/api/user",
            get(users_handlers::get_current_user).put(users_handlers::update_current_user),
        )
}

/// Full application router with request tracing
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/chat", post(chat_handlers::chat))
        .merge(create_users_router())
        .merge(create_templates_router())
        .merge(create_proposals_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
