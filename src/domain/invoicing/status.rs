//! Invoice lifecycle status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being drafted, not yet visible to the client.
    Draft,
    /// Delivered to the client and awaiting payment.
    Sent,
    /// Paid in full. Immutable from here.
    Paid,
    /// Written off. Terminal.
    Void,
}

impl InvoiceStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Void => "Void",
        }
    }

    /// Whether the invoice can still be edited.
    pub fn is_mutable(&self) -> bool {
        matches!(self, InvoiceStatus::Draft | InvoiceStatus::Sent)
    }
}

impl StateMachine for InvoiceStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, target),
            (Draft, Sent) | (Draft, Paid) | (Draft, Void) | (Sent, Paid) | (Sent, Void)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use InvoiceStatus::*;
        match self {
            Draft => vec![Sent, Paid, Void],
            Sent => vec![Paid, Void],
            Paid => vec![],
            Void => vec![],
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_can_be_sent_paid_or_voided() {
        let status = InvoiceStatus::Draft;
        assert!(status.can_transition_to(&InvoiceStatus::Sent));
        assert!(status.can_transition_to(&InvoiceStatus::Paid));
        assert!(status.can_transition_to(&InvoiceStatus::Void));
    }

    #[test]
    fn paid_is_terminal() {
        let status = InvoiceStatus::Paid;
        assert!(status.is_terminal());
        assert!(status.valid_transitions().is_empty());
    }

    #[test]
    fn void_cannot_be_revived() {
        let status = InvoiceStatus::Void;
        assert!(status.transition_to(InvoiceStatus::Sent).is_err());
        assert!(status.transition_to(InvoiceStatus::Paid).is_err());
    }

    #[test]
    fn sent_invoices_are_still_mutable() {
        assert!(InvoiceStatus::Sent.is_mutable());
        assert!(!InvoiceStatus::Paid.is_mutable());
    }
}
