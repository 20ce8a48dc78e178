use crate::{DeckError, ReplayStatus};

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Lifecycle state carried by a recording transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    /// Output is starting.
    Starting,
    /// Output started.
    Started,
    /// Output is stopping.
    Stopping,
    /// Output stopped; the file is complete.
    Stopped,
    /// Output paused.
    Paused,
    /// Output resumed after a pause.
    Resumed,
}

impl FromStr for OutputState {
    type Err = DeckError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OBS_WEBSOCKET_OUTPUT_STARTING" => Ok(OutputState::Starting),
            "OBS_WEBSOCKET_OUTPUT_STARTED" => Ok(OutputState::Started),
            "OBS_WEBSOCKET_OUTPUT_STOPPING" => Ok(OutputState::Stopping),
            "OBS_WEBSOCKET_OUTPUT_STOPPED" => Ok(OutputState::Stopped),
            "OBS_WEBSOCKET_OUTPUT_PAUSED" => Ok(OutputState::Paused),
            "OBS_WEBSOCKET_OUTPUT_RESUMED" => Ok(OutputState::Resumed),
            other => Err(DeckError::MalformedPushEvent {
                reason: format!("Unknown output state: {}", other),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Pushed when the recording output changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTransitionEvent {
    /// Whether the output is active after this transition.
    pub active: bool,
    /// File being written, when the server reports one.
    pub output_path: Option<String>,
    /// The new output state.
    pub state: OutputState,
}

/// Pushed once per replay buffer save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySavedEvent {
    /// Path of the saved replay file.
    pub saved_path: String,
}

/// Every push event kind the controller consumes, in one tagged union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Recording output changed state.
    RecordStateChanged(RecordTransitionEvent),
    /// Replay buffer started or stopped.
    ReplayStateChanged(ReplayStatus),
    /// Replay buffer was saved to disk.
    ReplaySaved(ReplaySavedEvent),
}
