//! MarkNotificationReadHandler - marks one notification read.

use std::sync::Arc;

use crate::domain::foundation::{ClinicId, DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

/// Command to mark a notification read.
#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
    pub clinic_id: ClinicId,
    pub user_id: UserId,
    pub notification_id: NotificationId,
}

/// Handler for marking a notification read.
pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        cmd: MarkNotificationReadCommand,
    ) -> Result<Notification, DomainError> {
        // Someone else's notification is indistinguishable from a
        // missing one.
        let mut notification = self
            .notifications
            .find_by_id(&cmd.notification_id)
            .await?
            .filter(|n| n.user_id == cmd.user_id && n.clinic_id == cmd.clinic_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
            })?;

        notification.mark_read();
        self.notifications.update(&notification).await?;

        Ok(notification)
    }
}
