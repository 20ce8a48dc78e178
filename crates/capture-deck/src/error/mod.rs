use capture_deck_core::DeckError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the capture-deck binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Capture or window-search error from capture-deck-core.
    #[error("Deck error: {source} {location}")]
    Deck {
        /// The underlying core error.
        #[source]
        source: DeckError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to register global hotkey.
    #[error("Hotkey registration failed: {reason} {location}")]
    HotkeyRegistrationFailed {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to build or update the tray icon, its menu or the overlay window.
    #[error("Tray error: {reason} {location}")]
    TrayError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<DeckError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<DeckError> for AppError {
    #[track_caller]
    fn from(source: DeckError) -> Self {
        AppError::Deck {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
