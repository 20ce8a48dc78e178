/// Lifecycle of the search overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Overlay hidden.
    Idle,
    /// Overlay shown with no query; results are the full snapshot.
    Empty,
    /// Query edited, debounce timer running.
    Pending,
    /// Timer fired, results reflect the latest query.
    Settled,
}

impl SearchPhase {
    /// Whether the overlay is shown.
    pub fn is_active(self) -> bool {
        self != SearchPhase::Idle
    }
}
