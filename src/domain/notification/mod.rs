//! Notification domain: per-user messages with read state.

mod notification;

pub use notification::{Notification, NotificationKind};
