// ABOUTME: Proposal generation workflow for Proposer
// ABOUTME: Template resolution, prompt construction, model call and persistence, plus the chat assistant

pub mod chat;
pub mod error;
pub mod orchestrator;
pub mod prompts;
pub mod request;

pub use chat::{ChatAssistant, MAX_CHAT_MESSAGE_CHARS};
pub use error::{ChatError, GenerationError};
pub use orchestrator::ProposalGenerator;
pub use request::GenerateProposalRequest;
