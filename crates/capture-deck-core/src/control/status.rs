/// Recording output status as reported by the capture server.
///
/// Authoritative only right after a synchronous query; a cache afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingStatus {
    /// Recording output is running.
    pub active: bool,
    /// Recording output is paused.
    pub paused: bool,
}

/// Replay buffer status as reported by the capture server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStatus {
    /// Replay buffer is running.
    pub active: bool,
}
