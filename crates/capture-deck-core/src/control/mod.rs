mod dispatcher;
mod event;
mod indicator;
mod machine;
mod status;

pub use {
    dispatcher::{CommandDispatcher, Notifier},
    event::{CaptureEvent, OutputState, RecordTransitionEvent, ReplaySavedEvent},
    indicator::{Indicators, RecordIndicator, ReplayIndicator},
    machine::RecordingStateMachine,
    status::{RecordingStatus, ReplayStatus},
};
