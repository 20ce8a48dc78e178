use crate::config::default_notifications_enabled;

use serde::{Deserialize, Serialize};

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether to show desktop toasts. When false, messages are only logged.
    #[serde(default = "default_notifications_enabled")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_notifications_enabled(),
        }
    }
}
