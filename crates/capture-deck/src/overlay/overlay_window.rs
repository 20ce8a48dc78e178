//! Always-on-top search overlay window.

use crate::{
    AppCommand, AppError, AppResult,
    overlay::{OverlayKey, QueryInput},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::Key,
    window::{Window, WindowBuilder, WindowId},
};
use tracing::{debug, instrument};

/// Hidden-until-activated overlay. Lives on the UI thread.
pub struct OverlayWindow {
    window: Window,
    input: QueryInput,
}

impl OverlayWindow {
    /// Builds the overlay window, initially hidden.
    #[track_caller]
    #[instrument(skip(target))]
    pub fn new<T: 'static>(target: &EventLoopWindowTarget<T>) -> AppResult<Self> {
        let window = WindowBuilder::new()
            .with_title("Find window")
            .with_inner_size(LogicalSize::new(640.0, 48.0))
            .with_resizable(false)
            .with_always_on_top(true)
            .with_visible(false)
            .build(target)
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create overlay window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            window,
            input: QueryInput::new(),
        })
    }

    /// Whether events for `id` belong to the overlay.
    pub fn owns(&self, id: WindowId) -> bool {
        self.window.id() == id
    }

    /// Shows and focuses the overlay with an empty query.
    pub fn open(&mut self, title: &str) {
        self.input.clear();
        self.window.set_title(title);
        self.window.set_visible(true);
        self.window.set_focus();
        debug!("Overlay shown");
    }

    /// Updates the title.
    pub fn refresh(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Hides the overlay.
    pub fn hide(&self) {
        self.window.set_visible(false);
        debug!("Overlay hidden");
    }

    /// Maps an overlay window event to an app command.
    pub fn handle_event(&mut self, event: &WindowEvent<'_>) -> Option<AppCommand> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                overlay_key(event).and_then(|key| self.input.apply(key))
            }
            WindowEvent::CloseRequested => Some(AppCommand::DismissSearch),
            _ => None,
        }
    }
}

fn overlay_key(event: &KeyEvent) -> Option<OverlayKey> {
    if event.state != ElementState::Pressed {
        return None;
    }

    match &event.logical_key {
        Key::Escape => Some(OverlayKey::Escape),
        Key::Enter => Some(OverlayKey::Enter),
        Key::Backspace => Some(OverlayKey::Backspace),
        Key::ArrowUp => Some(OverlayKey::Up),
        Key::ArrowDown => Some(OverlayKey::Down),
        _ => event.text.map(|text| OverlayKey::Text(text.to_string())),
    }
}
