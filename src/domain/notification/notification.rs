//! Notification aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClinicId, NotificationId, Timestamp, UserId, ValidationError};

/// What a notification is about. Drives frontend grouping and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Appointment,
    Invoice,
    Billing,
    System,
}

impl NotificationKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            NotificationKind::Appointment => "Appointment",
            NotificationKind::Invoice => "Invoice",
            NotificationKind::Billing => "Billing",
            NotificationKind::System => "System",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A message surfaced to a user, scoped to the clinic it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub clinic_id: ClinicId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn create(
        user_id: UserId,
        clinic_id: ClinicId,
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        Ok(Notification {
            id: NotificationId::new(),
            user_id,
            clinic_id,
            kind,
            title,
            body: body.into(),
            read: false,
            read_at: None,
            created_at: Timestamp::now(),
        })
    }

    /// Marks the notification read. Reading twice keeps the first
    /// read time.
    pub fn mark_read(&mut self) {
        if !self.read {
            self.read = true;
            self.read_at = Some(Timestamp::now());
        }
    }
}
