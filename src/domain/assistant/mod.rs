//! Assistant domain: prompt assembly and reply post-processing.
//!
//! One-shot calls only. The caller supplies any history it wants
//! echoed into the prompt; nothing is stored server side.

mod email_draft;
mod prompt;

pub use email_draft::{parse_email_draft, EmailDraft, FALLBACK_SUBJECT};
pub use prompt::{
    build_messages, AppointmentSnapshot, ChatMessage, ChatRole, ClientSnapshot, PromptContext,
    ASSISTANT_PERSONA, RECENT_CLIENT_COUNT, UPCOMING_APPOINTMENT_COUNT,
};
