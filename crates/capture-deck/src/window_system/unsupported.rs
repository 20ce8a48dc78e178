use capture_deck_core::{CoreResult, DeckError, WindowCandidate, WindowHandle, WindowSystem};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::warn;

/// Stand-in for platforms without a window switcher backend.
///
/// Reports an empty desktop and refuses every focus request.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedWindowSystem;

impl UnsupportedWindowSystem {
    /// Creates the window system.
    pub fn new() -> Self {
        warn!("Window switching is only supported on Windows");
        Self
    }
}

impl WindowSystem for UnsupportedWindowSystem {
    fn top_level_windows(&self) -> CoreResult<Vec<WindowCandidate>> {
        Ok(Vec::new())
    }

    fn process_name_of(&self, _handle: WindowHandle) -> Option<String> {
        None
    }

    #[track_caller]
    fn focus(&self, handle: WindowHandle) -> CoreResult<()> {
        Err(DeckError::FocusRejected {
            handle,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
