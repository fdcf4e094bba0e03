//! Assistant configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Assistant configuration (Anthropic)
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Anthropic API key
    pub anthropic_api_key: String,

    /// Model to use for completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AssistantConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.anthropic_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if !self.anthropic_api_key.starts_with("sk-ant-") {
            return Err(ValidationError::InvalidAnthropicKey);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout() -> u64 {
    60
}
