use std::time::Duration;

/// Port for short user-facing notices.
pub trait NotificationPort: Send + Sync {
    /// Shows `message` for roughly `duration`. Must not block.
    fn notify(&self, message: &str, duration: Duration);
}
