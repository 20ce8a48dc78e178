//! Capture-deck Core Library
//!
//! Reactive state machines behind the capture-deck control panel: the
//! recording/replay-buffer controller that reconciles local commands with
//! pushed capture-server state, and the debounced fuzzy window search.
//!
//! Everything here runs on a single thread. OS windows, the capture server
//! and desktop notifications are reached only through the collaborator
//! traits [`WindowSystem`], [`CommandDispatcher`] and [`Notifier`].
//!
//! # Example
//!
//! ```
//! use capture_deck_core::{WindowEntry, WindowHandle, fuzzy_filter};
//!
//! let snapshot = vec![
//!     WindowEntry::new(WindowHandle(1), "Inbox - thunderbird.exe"),
//!     WindowEntry::new(WindowHandle(2), "main.rs - code.exe"),
//! ];
//!
//! let results = fuzzy_filter("mrs", &snapshot);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].handle, WindowHandle(2));
//! ```

mod control;
mod error;
mod search;
mod window;

pub use {
    control::{
        CaptureEvent, CommandDispatcher, Indicators, Notifier, OutputState, RecordIndicator,
        RecordTransitionEvent, RecordingStateMachine, RecordingStatus, ReplayIndicator,
        ReplaySavedEvent, ReplayStatus,
    },
    error::{DeckError, Result as CoreResult},
    search::{DEFAULT_DEBOUNCE, SearchController, SearchPhase, fuzzy_filter},
    window::{
        WindowCandidate, WindowEntry, WindowFlags, WindowHandle, WindowSnapshot,
        WindowSnapshotSource, WindowSystem,
    },
};
