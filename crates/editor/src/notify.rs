//! User-facing outcome reporting.
//!
//! The session never prints; it hands transient success/failure
//! messages to whatever sink the host installed.

/// Receives the session's transient user-facing notifications.
pub trait NotificationSink {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every notification.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
