#[allow(clippy::module_inception)]
mod config;
mod notification_config;
mod obs_config;
mod search_config;

pub(crate) use {
    config::Config,
    notification_config::NotificationConfig,
    obs_config::ObsConfig,
    search_config::SearchConfig,
};

#[cfg(test)]
pub(crate) use obs_config::resolve_password;

pub(crate) const DEFAULT_OBS_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_OBS_PORT: u16 = 4455;
pub(crate) const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub(crate) const DEFAULT_HOTKEY: &str = "ctrl+super+Slash";
pub(crate) const DEFAULT_DEBOUNCE_MS: u64 = capture_deck_core::DEFAULT_DEBOUNCE.as_millis() as u64;
pub(crate) const DEFAULT_NOTIFICATIONS_ENABLED: bool = true;

/// Environment variable consulted when no password is configured.
pub(crate) const PASSWORD_ENV_VAR: &str = "OBS_WS_PASSWORD";

pub(crate) fn default_obs_host() -> String {
    DEFAULT_OBS_HOST.to_string()
}

pub(crate) fn default_obs_port() -> u16 {
    DEFAULT_OBS_PORT
}

pub(crate) fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

pub(crate) fn default_hotkey() -> String {
    DEFAULT_HOTKEY.to_string()
}

pub(crate) fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

pub(crate) fn default_notifications_enabled() -> bool {
    DEFAULT_NOTIFICATIONS_ENABLED
}
