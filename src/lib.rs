//! CliniKit - Multi-tenant clinic management backend
//!
//! This crate implements clinic operations (clients, scheduling, invoicing,
//! subscriptions, notifications, reporting) behind a REST API, with plan-based
//! limit enforcement and an AI-assisted helper.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
