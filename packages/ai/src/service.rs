// ABOUTME: AI service for text generation calls to Anthropic Claude
// ABOUTME: Handles API requests, error mapping and response text extraction

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::config::AIConfig;
use crate::generator::TextGenerator;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Model returned no text")]
    EmptyResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Anthropic messages API client
pub struct AIService {
    client: Client,
    config: AIConfig,
}

impl AIService {
    pub fn new(config: AIConfig) -> AIServiceResult<Self> {
        let mut builder = Client::builder().connect_timeout(std::time::Duration::from_secs(10));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        if config.api_key.is_none() {
            info!("ANTHROPIC_API_KEY not set - generation requests will fail until it is configured");
        }

        Ok(Self { client, config })
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(&self, system_prompt: &str, prompt: &str) -> AIServiceResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AIServiceError::NoApiKey)?;

        let request = AnthropicRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            system: (!system_prompt.is_empty()).then_some(system_prompt),
        };

        info!(
            "Making Anthropic API text generation request: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Anthropic API request timed out");
                    AIServiceError::ApiError(
                        "Request timed out. The AI service may be overloaded or unavailable."
                            .to_string(),
                    )
                } else if e.is_connect() {
                    error!("Failed to connect to Anthropic API: {}", e);
                    AIServiceError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Anthropic API request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        info!(
            "Received response from Anthropic API: status={}",
            response.status()
        );

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Anthropic API error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        if let Some(usage) = anthropic_response.usage {
            info!(
                "Anthropic usage: input={}, output={}, total={}",
                usage.input_tokens,
                usage.output_tokens,
                usage.total_tokens()
            );
        }

        extract_text(anthropic_response.content)
    }
}

/// Join the text blocks of a response. Whitespace-only output counts as no output.
fn extract_text(content: Vec<ContentBlock>) -> AIServiceResult<String> {
    if content.is_empty() {
        return Err(AIServiceError::InvalidResponse);
    }

    let text: String = content
        .into_iter()
        .filter(|block| block.content_type == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AIServiceError::EmptyResponse);
    }

    Ok(text)
}

#[async_trait]
impl TextGenerator for AIService {
    async fn generate_text(&self, system_prompt: &str, prompt: &str) -> AIServiceResult<String> {
        self.send(system_prompt, prompt).await
    }
}
