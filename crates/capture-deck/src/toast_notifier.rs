use capture_deck_core::Notifier;

use notify_rust::Notification;
use tracing::{debug, warn};

const APP_NAME: &str = "Capture Deck";

/// Fire-and-forget desktop toasts.
///
/// When disabled, messages only reach the log.
#[derive(Debug, Clone, Copy)]
pub struct ToastNotifier {
    enabled: bool,
}

impl ToastNotifier {
    /// Creates a notifier.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, text: &str) {
        if !self.enabled {
            debug!(text, "Notifications disabled, message not shown");
            return;
        }

        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(APP_NAME)
            .body(text)
            .show()
        {
            warn!(error = ?e, "Failed to show notification");
        }
    }
}
