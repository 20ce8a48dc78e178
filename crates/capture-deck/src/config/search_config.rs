use crate::config::{default_debounce_ms, default_hotkey};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Window search overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Global chord that opens the overlay, in `global-hotkey` syntax.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,

    /// Quiet period after the last keystroke before filtering, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    /// Debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
