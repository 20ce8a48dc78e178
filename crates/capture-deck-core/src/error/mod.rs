use crate::WindowHandle;

use error_location::ErrorLocation;
use thiserror::Error;

/// Capture-control and window-search errors with source location tracking.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Capture server could not be reached, or the connection dropped.
    #[error("Capture server unavailable: {reason} {location}")]
    ConnectionUnavailable {
        /// Description of the connection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Capture server answered a request with a failure status.
    #[error("Request {request} rejected (code {code}): {comment:?} {location}")]
    CommandRejected {
        /// Request type that was rejected.
        request: String,
        /// Status code reported by the server.
        code: i64,
        /// Optional human-readable comment from the server.
        comment: Option<String>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Request reply was missing expected fields.
    #[error("Malformed response: {reason} {location}")]
    MalformedResponse {
        /// Description of what was missing or invalid.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Push event payload could not be decoded.
    #[error("Malformed push event: {reason} {location}")]
    MalformedPushEvent {
        /// Description of what was missing or invalid.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Window handle no longer refers to a live window.
    #[error("Window {handle} no longer exists {location}")]
    StaleWindowHandle {
        /// The stale handle.
        handle: WindowHandle,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The OS refused to move the window to the foreground.
    #[error("Focus request for window {handle} was refused {location}")]
    FocusRejected {
        /// The window that could not be focused.
        handle: WindowHandle,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Enumerating top-level windows failed.
    #[error("Window enumeration failed: {reason} {location}")]
    WindowEnumerationFailed {
        /// Description of the enumeration failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`DeckError`].
pub type Result<T> = std::result::Result<T, DeckError>;
