//! HTTP DTOs for assistant endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::assistant::{ChatMessage, EmailDraft};

/// Request to ask the assistant a question.
///
/// `history` is the prior conversation; the caller sends back what the
/// previous response returned.
#[derive(Debug, Clone, Deserialize)]
pub struct AskAssistantRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Response to an assistant question.
#[derive(Debug, Clone, Serialize)]
pub struct AskAssistantResponse {
    pub reply: String,
    pub history: Vec<ChatMessage>,
}

/// Request to draft an email to a client.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftEmailRequest {
    pub client_id: String,
    pub instructions: String,
}

/// Response containing the drafted email.
#[derive(Debug, Clone, Serialize)]
pub struct DraftEmailResponse {
    pub draft: EmailDraft,
    pub client_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assistant::ChatRole;

    #[test]
    fn ask_request_defaults_to_empty_history() {
        let request: AskAssistantRequest =
            serde_json::from_str(r#"{"question": "How many active clients do we have?"}"#)
                .unwrap();

        assert!(request.history.is_empty());
    }

    #[test]
    fn ask_request_parses_history_roles() {
        let json = r#"{
            "question": "And next week?",
            "history": [
                {"role": "user", "content": "How many appointments this week?"},
                {"role": "assistant", "content": "You have 12 booked."}
            ]
        }"#;

        let request: AskAssistantRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].role, ChatRole::User);
    }
}
