//! Email sender port.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// An outbound email.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative, when there is one.
    pub text: Option<String>,
}

impl OutboundEmail {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Port for transactional email delivery.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one email.
    ///
    /// # Errors
    ///
    /// - `EmailDeliveryError` when the provider rejects the message
    async fn send(&self, email: OutboundEmail) -> Result<(), DomainError>;
}
