mod controller;
mod debounce;
pub(crate) mod fuzzy;
mod search_phase;

use std::time::Duration;

pub(crate) use debounce::Debounce;

pub use {controller::SearchController, fuzzy::fuzzy_filter, search_phase::SearchPhase};

/// Quiet period after the last query edit before filtering runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
