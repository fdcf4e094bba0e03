//! AI adapters - assistant completions through Anthropic.

mod anthropic_assistant;

pub use anthropic_assistant::{AnthropicAssistant, AnthropicConfig};
