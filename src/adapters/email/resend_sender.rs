//! Resend email sender adapter.
//!
//! Implements the `EmailSender` port against the Resend HTTP API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EmailSender, OutboundEmail};

/// Resend implementation of the EmailSender port.
pub struct ResendEmailSender {
    api_key: SecretString,
    /// From header, e.g. `CliniKit <invoices@clinikit.app>`.
    from: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl ResendEmailSender {
    /// Creates a sender using the given API key (re_...) and From
    /// header.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from: from.into(),
            api_base_url: "https://api.resend.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Resend send-email request body.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, email: OutboundEmail) -> Result<(), DomainError> {
        let url = format!("{}/emails", self.api_base_url);
        let body = SendEmailRequest {
            from: &self.from,
            to: vec![&email.to],
            subject: &email.subject,
            html: &email.html,
            text: email.text.as_deref(),
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::EmailDeliveryError,
                    format!("Email request failed: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, error = %error_text, "Resend send failed");
            return Err(DomainError::new(
                ErrorCode::EmailDeliveryError,
                format!("Email provider error ({}): {}", status, error_text),
            ));
        }

        Ok(())
    }
}
