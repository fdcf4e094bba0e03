//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. Handlers validate input, load aggregates, apply domain
//! rules, and persist the outcome; they never touch SQL or HTTP.

pub mod handlers;
