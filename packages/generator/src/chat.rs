// ABOUTME: Stateless single-turn chat with the proposal assistant persona
// ABOUTME: Validates message length before forwarding it to the text generator

use std::sync::Arc;

use proposer_ai::TextGenerator;
use proposer_core::ValidationErrors;
use tracing::{error, info};

use crate::error::ChatError;
use crate::prompts::CHAT_SYSTEM_PROMPT;

pub const MAX_CHAT_MESSAGE_CHARS: usize = 10_000;

pub struct ChatAssistant {
    ai: Arc<dyn TextGenerator>,
}

impl ChatAssistant {
    pub fn new(ai: Arc<dyn TextGenerator>) -> Self {
        Self { ai }
    }

    pub async fn reply(&self, message: &str) -> Result<String, ChatError> {
        validate_message(message)?;

        info!("Chat message received ({} chars)", message.chars().count());

        self.ai
            .generate_text(CHAT_SYSTEM_PROMPT, message.trim())
            .await
            .map_err(|e| {
                error!("Chat generation failed: {}", e);
                ChatError::Generation(e)
            })
    }
}

fn validate_message(message: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_non_empty("message", message);
    if message.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        errors.add(
            "message",
            format!("must be at most {} characters", MAX_CHAT_MESSAGE_CHARS),
        );
    }
    errors.into_result(())
}
