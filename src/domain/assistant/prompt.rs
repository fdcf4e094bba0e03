//! Prompt assembly for the practice assistant.
//!
//! The assistant gets a fixed persona, a rendered snapshot of the
//! clinic's recent clients and upcoming appointments, the caller's
//! chat history echoed back, and finally the new question. Nothing is
//! persisted between calls.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// How many recent clients the context includes.
pub const RECENT_CLIENT_COUNT: usize = 5;

/// How many upcoming appointments the context includes.
pub const UPCOMING_APPOINTMENT_COUNT: usize = 10;

/// Fixed system persona sent with every request.
pub const ASSISTANT_PERSONA: &str = "You are the practice assistant for a healthcare clinic. \
You help the clinic's staff with scheduling, client communication, and day-to-day practice \
administration. Be concise and professional. Only rely on the clinic context you are given; \
never invent client details and never give medical advice.";

/// Role of a message in the assistant conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// Instructions to the model.
    System,
    /// Staff member input.
    User,
    /// Model response.
    Assistant,
}

/// A message in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A client line in the rendered context.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSnapshot {
    pub name: String,
    pub status: String,
}

/// An appointment line in the rendered context.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentSnapshot {
    pub client_name: String,
    pub service_name: String,
    pub starts_at: Timestamp,
}

/// Clinic data snapshot woven into the system prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub clinic_name: String,
    pub clients: Vec<ClientSnapshot>,
    pub appointments: Vec<AppointmentSnapshot>,
}

impl PromptContext {
    /// Renders the snapshot as plain text for the system prompt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Clinic: {}\n\n", self.clinic_name));

        out.push_str("Recent clients:\n");
        if self.clients.is_empty() {
            out.push_str("- none\n");
        }
        for client in self.clients.iter().take(RECENT_CLIENT_COUNT) {
            out.push_str(&format!("- {} ({})\n", client.name, client.status));
        }

        out.push_str("\nUpcoming appointments:\n");
        if self.appointments.is_empty() {
            out.push_str("- none\n");
        }
        for appt in self.appointments.iter().take(UPCOMING_APPOINTMENT_COUNT) {
            out.push_str(&format!(
                "- {} with {} at {}\n",
                appt.service_name,
                appt.client_name,
                appt.starts_at.as_datetime().format("%Y-%m-%d %H:%M UTC"),
            ));
        }

        out
    }
}

/// Assembles the full message list for one assistant call: persona
/// plus context as the system message, prior history in order, then
/// the new question.
pub fn build_messages(
    context: &PromptContext,
    history: &[ChatMessage],
    question: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(format!(
        "{}\n\n{}",
        ASSISTANT_PERSONA,
        context.render()
    )));
    messages.extend(
        history
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .cloned(),
    );
    messages.push(ChatMessage::user(question));
    messages
}
