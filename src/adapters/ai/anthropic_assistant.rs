//! Anthropic assistant adapter.
//!
//! Implements the `AssistantProvider` port against the Anthropic
//! Messages API. One-shot completions only; the system prompt travels
//! in the dedicated `system` field because the API rejects system
//! messages in the turn list.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::assistant::{ChatMessage, ChatRole};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::AssistantProvider;

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic assistant adapter.
#[derive(Clone)]
pub struct AnthropicConfig {
    api_key: SecretString,
    /// Model to use, e.g. "claude-3-5-sonnet-latest".
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Completion cap per request.
    pub max_tokens: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            model: "claude-3-5-sonnet-latest".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 1024,
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the completion cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic implementation of the AssistantProvider port.
pub struct AnthropicAssistant {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicAssistant {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Converts the port's message list to Anthropic's format.
    fn to_api_request(&self, messages: &[ChatMessage]) -> ApiRequest {
        let mut system_parts = Vec::new();
        let mut turns = Vec::new();

        for msg in messages {
            match msg.role {
                ChatRole::System => system_parts.push(msg.content.as_str()),
                ChatRole::User => turns.push(ApiMessage {
                    role: "user",
                    content: msg.content.clone(),
                }),
                ChatRole::Assistant => turns.push(ApiMessage {
                    role: "assistant",
                    content: msg.content.clone(),
                }),
            }
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        ApiRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system,
            messages: turns,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

fn extract_text(response: ApiResponse) -> String {
    response
        .content
        .into_iter()
        .filter_map(|block| {
            if block.block_type == "text" {
                block.text
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

#[async_trait]
impl AssistantProvider for AnthropicAssistant {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let request = self.to_api_request(messages);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::AssistantProviderError,
                    format!("Assistant request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, error = %error_text, "Anthropic completion failed");
            return Err(DomainError::new(
                ErrorCode::AssistantProviderError,
                format!("Assistant provider error ({}): {}", status, error_text),
            ));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::AssistantProviderError,
                format!("Failed to parse assistant response: {}", e),
            )
        })?;

        Ok(extract_text(api_response))
    }
}
