//! Email draft post-processing.
//!
//! The model is asked to start its reply with a `Subject:` line. The
//! extractor pulls that line out and treats the rest as the body,
//! falling back to a generic subject when the model ignores the
//! instruction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SUBJECT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*subject\s*:\s*(.+)\s*$").expect("subject regex is valid")
});

/// Subject used when the reply has no recognizable subject line.
pub const FALLBACK_SUBJECT: &str = "Message from your clinic";

/// A drafted client email, split into subject and body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Splits a model reply into subject and body.
///
/// Takes the first `Subject:` line anywhere in the reply, case
/// insensitively. Everything except that line becomes the body, with
/// surrounding whitespace trimmed.
pub fn parse_email_draft(reply: &str) -> EmailDraft {
    match SUBJECT_LINE.captures(reply) {
        Some(captures) => {
            let whole_line = captures.get(0).map(|m| m.as_str()).unwrap_or_default();
            let subject = captures
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_else(|| FALLBACK_SUBJECT.to_string());
            let body = reply.replacen(whole_line, "", 1).trim().to_string();
            EmailDraft { subject, body }
        }
        None => EmailDraft {
            subject: FALLBACK_SUBJECT.to_string(),
            body: reply.trim().to_string(),
        },
    }
}
