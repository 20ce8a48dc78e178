use capture_deck_core::Indicators;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` and the overlay window (both `!Send`),
/// so all tray and overlay mutations and process lifecycle events flow
/// through this enum.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Repaint the tray icon and tooltip.
    SetIndicators(Indicators),
    /// Show and focus the overlay with a fresh, empty query.
    OpenOverlay {
        /// Overlay title describing query and matches.
        title: String,
    },
    /// Update the overlay title after results or highlight changed.
    RefreshOverlay {
        /// Overlay title describing query and matches.
        title: String,
    },
    /// Hide the overlay.
    HideOverlay,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
