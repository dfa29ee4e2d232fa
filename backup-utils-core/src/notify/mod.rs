//! Producing side of the backup log.
//!
//! Every line written here is readable by both the viewer and the
//! statistics parser in [`crate::logs`].

mod notification;
mod writer;


pub use notification::{InvalidNotificationKind, Notification, NotificationKind};
pub use writer::{BackupLogWriter, NotifyError};
