/// Commands sent from the UI thread and the hotkey handler to the app task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Start recording when off, stop it otherwise.
    ToggleRecord,
    /// Pause or resume the current recording.
    TogglePause,
    /// Start or stop the replay buffer.
    ToggleReplay,
    /// Save the replay buffer to disk.
    SaveReplay,
    /// Open the window search overlay.
    ActivateSearch,
    /// The overlay query text changed.
    QueryChanged {
        /// Full query text after the edit.
        text: String,
    },
    /// Move the overlay highlight by `delta` rows.
    MoveHighlight {
        /// Rows to move; negative moves up.
        delta: isize,
    },
    /// Focus the highlighted window and close the overlay.
    SelectHighlighted,
    /// Close the overlay without selecting.
    DismissSearch,
    /// Open the configuration file in the default editor.
    OpenSettings,
    /// Stop active outputs and exit.
    Quit,
}
