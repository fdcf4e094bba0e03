//! HTTP DTOs for notification endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ClinicId;
use crate::domain::notification::{Notification, NotificationKind};

/// Query parameters for the notification listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListNotificationsParams {
    pub clinic_id: ClinicId,
    #[serde(default)]
    pub unread_only: bool,
}

/// Request body scoping a mark-read action to a clinic.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub clinic_id: ClinicId,
}

/// A notification as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub clinic_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub read_at: Option<String>,
    pub created_at: String,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            clinic_id: notification.clinic_id.to_string(),
            kind: notification.kind,
            title: notification.title,
            body: notification.body,
            read: notification.read,
            read_at: notification.read_at.map(|t| t.as_datetime().to_rfc3339()),
            created_at: notification.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the notification listing.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
}

/// Response after marking every notification read.
#[derive(Debug, Clone, Serialize)]
pub struct MarkAllReadResponse {
    pub marked_read: u64,
}
