//! Notification handlers.

mod list_notifications;
mod mark_all_read;
mod mark_notification_read;

pub use list_notifications::{ListNotificationsHandler, ListNotificationsQuery};
pub use mark_all_read::{MarkAllReadCommand, MarkAllReadHandler};
pub use mark_notification_read::{MarkNotificationReadCommand, MarkNotificationReadHandler};
