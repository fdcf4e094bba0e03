//! Notification repository port.

use crate::domain::foundation::{ClinicId, DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use async_trait::async_trait;

/// Repository port for Notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Save a new notification.
    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Update an existing notification.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if it doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Find a notification by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &NotificationId)
        -> Result<Option<Notification>, DomainError>;

    /// List a user's notifications in one clinic, newest first. When
    /// `unread_only` is set, read notifications are skipped.
    async fn list_for_user(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Mark every unread notification read in one statement.
    ///
    /// Returns how many rows changed.
    async fn mark_all_read(
        &self,
        clinic_id: &ClinicId,
        user_id: &UserId,
    ) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn NotificationRepository) {}
    }
}
