//! Client lifecycle status.

use serde::{Deserialize, Serialize};

/// Where a client stands with the clinic.
///
/// Active and waitlisted clients occupy a slot against the clinic's
/// plan limit. Inactive clients are retained for their history but do
/// not count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Receiving care.
    Active,
    /// Waiting for an opening.
    Waitlist,
    /// No longer with the clinic.
    Inactive,
}

impl ClientStatus {
    /// Whether this client occupies a slot against the plan's client limit.
    pub fn counts_toward_limit(&self) -> bool {
        !matches!(self, ClientStatus::Inactive)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Waitlist => "Waitlist",
            ClientStatus::Inactive => "Inactive",
        }
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Active
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
