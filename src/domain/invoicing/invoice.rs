//! Invoice aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClientId, ClinicId, InvoiceId, StateMachine, Timestamp};

use super::{validate_amounts, InvoiceStatus, InvoicingError, LineItem, PublicToken};

/// A bill issued by a clinic to one of its clients.
///
/// Amounts are validated on the way in: an invoice whose line items do
/// not reconcile with its subtotal, tax, and total never exists. Once
/// paid the invoice is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub clinic_id: ClinicId,
    pub client_id: ClientId,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    /// Token for unauthenticated view-and-pay access.
    pub public_token: PublicToken,
    /// Payment intent created when the client starts paying.
    pub payment_intent_id: Option<String>,
    pub due_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub sent_at: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Invoice {
    /// Creates a draft invoice after validating its arithmetic.
    pub fn create(
        clinic_id: ClinicId,
        client_id: ClientId,
        items: Vec<LineItem>,
        subtotal: f64,
        tax: f64,
        total: f64,
    ) -> Result<Self, InvoicingError> {
        validate_amounts(&items, subtotal, tax, total)?;

        let now = Timestamp::now();
        Ok(Invoice {
            id: InvoiceId::new(),
            clinic_id,
            client_id,
            items,
            subtotal,
            tax,
            total,
            status: InvoiceStatus::Draft,
            public_token: PublicToken::generate(),
            payment_intent_id: None,
            due_date: None,
            notes: None,
            sent_at: None,
            paid_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the invoice's amounts, re-running validation. Only
    /// mutable invoices can be edited.
    pub fn update_amounts(
        &mut self,
        items: Vec<LineItem>,
        subtotal: f64,
        tax: f64,
        total: f64,
    ) -> Result<(), InvoicingError> {
        self.ensure_mutable("update")?;
        validate_amounts(&items, subtotal, tax, total)?;
        self.items = items;
        self.subtotal = subtotal;
        self.tax = tax;
        self.total = total;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks the invoice as delivered to the client.
    pub fn send(&mut self) -> Result<(), InvoicingError> {
        self.transition(InvoiceStatus::Sent)?;
        self.sent_at = Some(Timestamp::now());
        Ok(())
    }

    /// Records successful payment. Terminal.
    pub fn mark_paid(&mut self, payment_intent_id: Option<String>) -> Result<(), InvoicingError> {
        self.transition(InvoiceStatus::Paid)?;
        if payment_intent_id.is_some() {
            self.payment_intent_id = payment_intent_id;
        }
        self.paid_at = Some(Timestamp::now());
        Ok(())
    }

    /// Writes the invoice off. Terminal.
    pub fn void(&mut self) -> Result<(), InvoicingError> {
        self.transition(InvoiceStatus::Void)
    }

    /// Links the payment intent created when the client begins paying.
    pub fn attach_payment_intent(
        &mut self,
        payment_intent_id: impl Into<String>,
    ) -> Result<(), InvoicingError> {
        self.ensure_mutable("attach a payment intent to")?;
        self.payment_intent_id = Some(payment_intent_id.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn set_due_date(&mut self, due_date: Option<Timestamp>) -> Result<(), InvoicingError> {
        self.ensure_mutable("update")?;
        self.due_date = due_date;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), InvoicingError> {
        self.ensure_mutable("update")?;
        self.notes = notes;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    fn ensure_mutable(&self, attempted: &str) -> Result<(), InvoicingError> {
        match self.status {
            InvoiceStatus::Paid => Err(InvoicingError::already_paid(self.id)),
            InvoiceStatus::Void => Err(InvoicingError::invalid_state(
                self.status.display_name(),
                attempted,
            )),
            _ => Ok(()),
        }
    }

    fn transition(&mut self, target: InvoiceStatus) -> Result<(), InvoicingError> {
        if !self.status.can_transition_to(&target) {
            if self.status == InvoiceStatus::Paid {
                return Err(InvoicingError::already_paid(self.id));
            }
            return Err(InvoicingError::invalid_state(
                self.status.display_name(),
                format!("mark as {}", target.display_name()),
            ));
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
