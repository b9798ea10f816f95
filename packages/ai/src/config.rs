// ABOUTME: Explicit configuration for the Anthropic client
// ABOUTME: Resolved once at startup and handed to AIService, never read from the environment here

use std::time::Duration;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct AIConfig {
    /// Requests fail with `NoApiKey` while this is unset
    pub api_key: Option<String>,
    pub model: String,
    /// Full URL of the messages endpoint
    pub api_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// `None` waits for the model indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: ANTHROPIC_API_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: None,
        }
    }
}

impl AIConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
