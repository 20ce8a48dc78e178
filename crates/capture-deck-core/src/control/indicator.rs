use crate::{RecordingStatus, ReplayStatus};

/// Recording axis of the control panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordIndicator {
    /// Not recording.
    #[default]
    Off,
    /// Recording.
    Recording,
    /// Recording, paused.
    Paused,
}

impl RecordIndicator {
    /// Indicator for a status report. `paused` implies recording.
    pub fn from_status(status: RecordingStatus) -> Self {
        if status.paused {
            RecordIndicator::Paused
        } else if status.active {
            RecordIndicator::Recording
        } else {
            RecordIndicator::Off
        }
    }

    /// Whether a recording output exists, paused or not.
    pub fn is_active(self) -> bool {
        self != RecordIndicator::Off
    }
}

/// Replay-buffer axis of the control panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplayIndicator {
    /// Replay buffer stopped.
    #[default]
    Off,
    /// Replay buffer running.
    Active,
}

impl ReplayIndicator {
    /// Indicator for a status report.
    pub fn from_status(status: ReplayStatus) -> Self {
        if status.active {
            ReplayIndicator::Active
        } else {
            ReplayIndicator::Off
        }
    }

    /// Whether the replay buffer is running.
    pub fn is_active(self) -> bool {
        self == ReplayIndicator::Active
    }
}

/// Both indicator axes as displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indicators {
    /// Recording axis.
    pub record: RecordIndicator,
    /// Replay-buffer axis.
    pub replay: ReplayIndicator,
}
