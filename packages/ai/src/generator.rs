// ABOUTME: Abstract text-generation interface
// ABOUTME: Lets the orchestrator and chat assistant run against the real API or an in-process fake

use async_trait::async_trait;

use crate::service::AIServiceResult;

/// Opaque text generation: a system instruction plus one user prompt in,
/// generated text out. Implementations never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, system_prompt: &str, prompt: &str) -> AIServiceResult<String>;
}
