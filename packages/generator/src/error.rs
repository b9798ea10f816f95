// ABOUTME: Error types for proposal generation and chat
// ABOUTME: Separates bad input from model failures and storage failures

use proposer_ai::AIServiceError;
use proposer_core::ValidationErrors;
use proposer_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid generation request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Failed to generate proposal: {0}")]
    Generation(#[from] AIServiceError),

    #[error("Failed to store proposal: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid chat message: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Chat service failed: {0}")]
    Generation(#[from] AIServiceError),
}
