use crate::{CoreResult, RecordingStatus, ReplayStatus};

/// Synchronous request/reply access to the capture server.
///
/// Every call is fire-and-check: a failure is returned once and never
/// retried.
pub trait CommandDispatcher {
    /// Starts recording.
    fn start_record(&mut self) -> CoreResult<()>;

    /// Stops recording.
    fn stop_record(&mut self) -> CoreResult<()>;

    /// Pauses or resumes recording.
    fn toggle_pause(&mut self) -> CoreResult<()>;

    /// Starts the replay buffer.
    fn start_replay(&mut self) -> CoreResult<()>;

    /// Stops the replay buffer.
    fn stop_replay(&mut self) -> CoreResult<()>;

    /// Saves the replay buffer to disk.
    fn save_replay(&mut self) -> CoreResult<()>;

    /// Queries the recording output status.
    fn get_record_status(&mut self) -> CoreResult<RecordingStatus>;

    /// Queries the replay buffer status.
    fn get_replay_status(&mut self) -> CoreResult<ReplayStatus>;
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    /// Shows `text` to the user.
    fn notify(&self, text: &str);
}
