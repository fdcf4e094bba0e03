//! Adapters - implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Repository and read model implementations
//! - `stripe` - Payment intents and webhook verification
//! - `email` - Transactional email delivery
//! - `ai` - Assistant completions
//! - `auth` - Session token validation
//! - `http` - REST API

pub mod ai;
pub mod auth;
pub mod email;
pub mod http;
pub mod postgres;
pub mod stripe;
