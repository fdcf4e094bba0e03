//! Billing domain - plans, subscriptions, trials, and limit enforcement.
//!
//! # Design
//!
//! A clinic holds exactly one [`Subscription`] referencing one [`Plan`].
//! Trials are a status on the subscription, not a separate entity: starting
//! a trial assigns the paid plan and a 14-day window; expiry reassigns the
//! free plan. Client-limit enforcement compares a clinic's non-inactive
//! client count against the plan's `client_limit` (0 = unlimited).

mod errors;
mod plan;
mod status;
mod subscription;
mod tier;

pub use errors::BillingError;
pub use plan::{Plan, PlanFeatures};
pub use status::SubscriptionStatus;
pub use subscription::{Subscription, TRIAL_LENGTH_DAYS};
pub use tier::PlanTier;
