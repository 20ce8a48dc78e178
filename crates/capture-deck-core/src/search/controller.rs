//! Debounced fuzzy search over a snapshot of open windows.
//!
//! Owns the single snapshot/result pair. Query edits only arm the debounce
//! timer; filtering happens once per quiet period on timer fire.

use crate::{
    CoreResult, DeckError, SearchPhase, WindowEntry, WindowHandle, WindowSnapshot,
    WindowSnapshotSource, WindowSystem, fuzzy_filter, search::Debounce,
};

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

/// Search overlay state machine.
pub struct SearchController<W> {
    source: WindowSnapshotSource<W>,
    debounce: Debounce,
    phase: SearchPhase,
    snapshot: WindowSnapshot,
    query: String,
    results: Vec<WindowEntry>,
    highlighted: Option<usize>,
    filter_passes: u64,
}

impl<W: WindowSystem> SearchController<W> {
    /// Creates an idle controller filtering after `quiet_period` of no edits.
    pub fn new(system: W, quiet_period: Duration) -> Self {
        Self {
            source: WindowSnapshotSource::new(system),
            debounce: Debounce::new(quiet_period),
            phase: SearchPhase::Idle,
            snapshot: Vec::new(),
            query: String::new(),
            results: Vec::new(),
            highlighted: None,
            filter_passes: 0,
        }
    }

    /// Rebuilds the snapshot and shows the full, unfiltered list.
    ///
    /// Blocks on window enumeration so the overlay never shows results from
    /// an older snapshot. Re-activating while shown rebuilds as well.
    ///
    /// # Errors
    ///
    /// Returns error if enumeration fails; the controller is then idle.
    #[instrument(skip(self))]
    pub fn activate(&mut self) -> CoreResult<()> {
        let snapshot = match self.source.enumerate() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.hide();
                return Err(e);
            }
        };

        self.debounce.cancel();
        self.query.clear();
        self.results = snapshot.clone();
        self.snapshot = snapshot;
        self.highlighted = None;
        self.phase = SearchPhase::Settled;

        info!(window_count = self.snapshot.len(), "Search overlay activated");

        Ok(())
    }

    /// Stores the latest query text and (re)starts the debounce timer.
    ///
    /// Ignored while idle.
    #[instrument(skip(self))]
    pub fn on_query_changed(&mut self, text: &str, now: Instant) {
        if !self.phase.is_active() {
            debug!("Query edit while overlay hidden, ignoring");
            return;
        }

        self.query.clear();
        self.query.push_str(text);
        self.debounce.arm(now);
        self.phase = SearchPhase::Pending;

        debug!("Debounce timer re-armed");
    }

    /// When the pending debounce timer elapses, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Fires the debounce timer if its deadline has passed at `now`.
    ///
    /// Returns `true` if results were recomputed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if self.debounce.is_due(now) {
            self.on_timer_fire()
        } else {
            false
        }
    }

    /// Filters the snapshot with the latest query.
    ///
    /// Only meaningful while a query edit is pending; otherwise a no-op that
    /// returns `false`.
    #[instrument(skip(self))]
    pub fn on_timer_fire(&mut self) -> bool {
        if self.phase != SearchPhase::Pending {
            return false;
        }

        self.debounce.cancel();

        let query = self.query.trim();
        self.results = fuzzy_filter(query, &self.snapshot);
        self.highlighted = None;
        self.filter_passes += 1;
        self.phase = if query.is_empty() {
            SearchPhase::Empty
        } else {
            SearchPhase::Settled
        };

        debug!(
            result_count = self.results.len(),
            snapshot_size = self.snapshot.len(),
            "Filter pass complete"
        );

        true
    }

    /// Moves the highlighted row by `delta`, clamped to the result list.
    ///
    /// With no row highlighted, moving down highlights the first row.
    pub fn move_highlight(&mut self, delta: isize) {
        if !self.phase.is_active() || self.results.is_empty() {
            self.highlighted = None;
            return;
        }

        let last = self.results.len() - 1;
        let current = self.highlighted.map_or(-1, |row| row as isize);
        let next = current.saturating_add(delta).clamp(0, last as isize);
        self.highlighted = Some(next as usize);
    }

    /// Focuses the window at `index` in the current results and hides.
    ///
    /// An out-of-range `index` is clamped to the first row. Focus failures
    /// are ignored: the overlay closes regardless. Returns the handle that
    /// was targeted, or `None` if there was nothing to select.
    #[instrument(skip(self))]
    pub fn select(&mut self, index: isize) -> Option<WindowHandle> {
        if !self.phase.is_active() {
            return None;
        }

        let row = match usize::try_from(index) {
            Ok(row) if row < self.results.len() => row,
            _ => {
                debug!(
                    index,
                    result_count = self.results.len(),
                    "Selection out of range, clamping to first row"
                );
                0
            }
        };

        let handle = self.results.get(row).map(|entry| entry.handle);

        if let Some(handle) = handle {
            match self.source.focus(handle) {
                Ok(()) => info!(handle = %handle, "Window focused"),
                Err(e @ DeckError::StaleWindowHandle { .. })
                | Err(e @ DeckError::FocusRejected { .. }) => {
                    debug!(error = %e, "Focus request not honoured");
                }
                Err(e) => warn!(error = ?e, "Focus request failed"),
            }
        }

        self.hide();

        handle
    }

    /// Selects the highlighted row, or the first row if none is highlighted.
    pub fn select_highlighted(&mut self) -> Option<WindowHandle> {
        let index = self.highlighted.map_or(-1, |row| row as isize);
        self.select(index)
    }

    /// Closes the overlay from any sub-state.
    pub fn escape(&mut self) {
        self.hide();
    }

    /// Clears results and returns to idle.
    pub fn hide(&mut self) {
        if self.phase.is_active() {
            debug!("Search overlay hidden");
        }

        self.debounce.cancel();
        self.query.clear();
        self.results.clear();
        self.snapshot.clear();
        self.highlighted = None;
        self.phase = SearchPhase::Idle;
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Latest query text, untrimmed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results currently on display.
    pub fn results(&self) -> &[WindowEntry] {
        &self.results
    }

    /// Highlighted row, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Number of filter passes run since creation.
    pub fn filter_passes(&self) -> u64 {
        self.filter_passes
    }
}
