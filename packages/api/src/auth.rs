// ABOUTME: Authentication context for API requests
// ABOUTME: Resolves the upstream-authenticated user id header into a stored user and its role

use axum::{extract::FromRequestParts, http::request::Parts};
use proposer_core::Caller;
use proposer_storage::StorageError;
use proposer_users::User;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the id of the user authenticated upstream
pub const USER_ID_HEADER: &str = "x-user-id";

/// Current authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        self.0.caller()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?;

        match state.users.get_user(user_id).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(StorageError::NotFound) => {
                debug!("Rejecting request for unknown user {}", user_id);
                Err(AppError::Unauthorized)
            }
            Err(e) => Err(AppError::Storage(e)),
        }
    }
}
