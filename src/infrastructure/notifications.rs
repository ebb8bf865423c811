//! User-facing notices with conditional compilation.

use std::time::Duration;

use crate::domain::ports::NotificationPort;

const NOTICE_TITLE: &str = "MAL Images";

/// Notice sink that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationService;

impl NotificationPort for LogNotificationService {
    fn notify(&self, message: &str, _duration: Duration) {
        tracing::info!(title = NOTICE_TITLE, "{message}");
    }
}

/// Desktop notification service.
#[cfg(feature = "notify")]
mod notify_impl {
    use super::*;
    use notify_rust::{Notification, Timeout};

    #[derive(Debug, Clone, Default)]
    pub struct DesktopNotificationService {
        enabled: bool,
    }

    impl DesktopNotificationService {
        #[must_use]
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }
    }

    impl NotificationPort for DesktopNotificationService {
        fn notify(&self, message: &str, duration: Duration) {
            LogNotificationService.notify(message, duration);
            if !self.enabled {
                return;
            }

            let body = message.to_string();
            let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
            let timeout = Timeout::Milliseconds(millis);

            tokio::task::spawn_blocking(move || {
                if let Err(e) = Notification::new()
                    .summary(NOTICE_TITLE)
                    .body(&body)
                    .appname("mal-covers")
                    .timeout(timeout)
                    .show()
                {
                    tracing::warn!("Failed to show notification: {}", e);
                }
            });
        }
    }
}

/// Stub notification service when notify feature is disabled.
#[cfg(not(feature = "notify"))]
mod stub_impl {
    use super::*;

    #[derive(Debug, Clone, Default)]
    pub struct DesktopNotificationService {
        _enabled: bool,
    }

    impl DesktopNotificationService {
        #[must_use]
        pub fn new(_enabled: bool) -> Self {
            Self { _enabled: false }
        }
    }

    impl NotificationPort for DesktopNotificationService {
        fn notify(&self, message: &str, duration: Duration) {
            LogNotificationService.notify(message, duration);
        }
    }
}

#[cfg(feature = "notify")]
pub use notify_impl::DesktopNotificationService;
#[cfg(not(feature = "notify"))]
pub use stub_impl::DesktopNotificationService;
