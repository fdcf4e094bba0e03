//! Assistant handlers: questions and email drafting.

mod ask_assistant;
mod draft_client_email;

pub use ask_assistant::{AskAssistantCommand, AskAssistantHandler, AskAssistantResult};
pub use draft_client_email::{
    DraftClientEmailCommand, DraftClientEmailHandler, DraftClientEmailResult,
};
