// ABOUTME: Text-generation collaborator for proposal and chat generation
// ABOUTME: TextGenerator seam plus the Anthropic messages API client behind it

pub mod config;
pub mod generator;
pub mod service;

pub use config::AIConfig;
pub use generator::TextGenerator;
pub use service::{AIService, AIServiceError, AIServiceResult, Usage};
