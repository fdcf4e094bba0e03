//! MarkAllReadHandler - clears a user's unread pile in one call.

use std::sync::Arc;

use crate::domain::foundation::{ClinicId, DomainError, UserId};
use crate::ports::NotificationRepository;

/// Command to mark every unread notification read.
#[derive(Debug, Clone)]
pub struct MarkAllReadCommand {
    pub clinic_id: ClinicId,
    pub user_id: UserId,
}

/// Handler for marking all notifications read.
pub struct MarkAllReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkAllReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Returns how many notifications changed.
    pub async fn handle(&self, cmd: MarkAllReadCommand) -> Result<u64, DomainError> {
        self.notifications
            .mark_all_read(&cmd.clinic_id, &cmd.user_id)
            .await
    }
}
