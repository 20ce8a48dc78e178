use crate::config::{
    PASSWORD_ENV_VAR, default_obs_host, default_obs_port, default_request_timeout_ms,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Capture server (obs-websocket) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsConfig {
    /// Host the websocket server listens on.
    #[serde(default = "default_obs_host")]
    pub host: String,

    /// Websocket port.
    #[serde(default = "default_obs_port")]
    pub port: u16,

    /// Server password. Falls back to `OBS_WS_PASSWORD` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Read timeout for synchronous requests, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            host: default_obs_host(),
            port: default_obs_port(),
            password: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ObsConfig {
    /// `ws://host:port` URL of the server.
    pub fn url(&self) -> String {
        format!("ws://{}:{}", self.host, self.port)
    }

    /// Request read timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Password from the file, or from the environment when the file has none.
    pub fn resolved_password(&self) -> Option<String> {
        resolve_password(
            self.password.as_deref(),
            std::env::var(PASSWORD_ENV_VAR).ok(),
        )
    }
}

/// Blank values count as unset on both sides.
pub(crate) fn resolve_password(configured: Option<&str>, env: Option<String>) -> Option<String> {
    configured
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .or_else(|| env.filter(|p| !p.trim().is_empty()))
}
