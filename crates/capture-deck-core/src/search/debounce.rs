use std::time::{Duration, Instant};

/// Single-shot timer that is re-armed, never stacked.
///
/// Holds at most one deadline; arming again replaces it, so a burst of
/// edits produces exactly one fire after the last one.
#[derive(Debug, Clone)]
pub(crate) struct Debounce {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub(crate) fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// Cancels any pending deadline and starts a new quiet period at `now`.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }
}
