//! Assistant provider port for external generative-text services.

use crate::domain::assistant::ChatMessage;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Port for the generative-text backend of the practice assistant.
///
/// One-shot completions only: no streaming, no retries, no state held
/// between calls.
#[async_trait]
pub trait AssistantProvider: Send + Sync {
    /// Send the message list and return the model's reply text.
    ///
    /// # Errors
    ///
    /// - `AssistantProviderError` when the service rejects or fails
    ///   the request
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError>;
}
