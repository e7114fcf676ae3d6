use std::cell::RefCell;
use std::time::Duration;

use notify_rust::{Notification, Timeout};

/// Delivers a fired reminder to the user. Delivery is fire-and-forget.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
}

/// System notifications through the platform notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    timeout: Duration,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            timeout,
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        if let Err(err) = Notification::new()
            .appname(&self.app_name)
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(millis))
            .show()
        {
            tracing::warn!(error = %err, title, "desktop notification failed");
        }
    }
}

/// Keeps every notification in memory instead of showing it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.sent
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
}
