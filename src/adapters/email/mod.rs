//! Email adapters - transactional delivery through Resend.

mod resend_sender;

pub use resend_sender::ResendEmailSender;
