//! ListNotificationsHandler - a user's notifications in one clinic.

use std::sync::Arc;

use crate::domain::foundation::{ClinicId, DomainError, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

/// Query to list notifications.
#[derive(Debug, Clone)]
pub struct ListNotificationsQuery {
    pub clinic_id: ClinicId,
    pub user_id: UserId,
    /// Skip notifications that were already read.
    pub unread_only: bool,
}

/// Handler for listing notifications.
pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        query: ListNotificationsQuery,
    ) -> Result<Vec<Notification>, DomainError> {
        let mut notifications = self
            .notifications
            .list_for_user(&query.clinic_id, &query.user_id, query.unread_only)
            .await?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }
}
