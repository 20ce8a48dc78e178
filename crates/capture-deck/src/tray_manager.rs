//! System tray control panel.
//!
//! The icon shows both indicator axes; the context menu carries one item per
//! control panel operation plus the window finder, Settings and Quit.

use crate::{AppCommand, AppError, AppResult, indicator_icon};

use capture_deck_core::Indicators;

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Ids of the tray menu items, resolved to commands on the app task.
#[derive(Debug, Clone)]
pub struct TrayMenuIds {
    pub(crate) toggle_record: MenuId,
    pub(crate) toggle_pause: MenuId,
    pub(crate) toggle_replay: MenuId,
    pub(crate) save_replay: MenuId,
    pub(crate) find_window: MenuId,
    pub(crate) settings: MenuId,
    pub(crate) quit: MenuId,
}

impl TrayMenuIds {
    /// Command for a clicked menu item, if it is one of ours.
    pub fn command_for(&self, id: &MenuId) -> Option<AppCommand> {
        let command = if *id == self.toggle_record {
            AppCommand::ToggleRecord
        } else if *id == self.toggle_pause {
            AppCommand::TogglePause
        } else if *id == self.toggle_replay {
            AppCommand::ToggleReplay
        } else if *id == self.save_replay {
            AppCommand::SaveReplay
        } else if *id == self.find_window {
            AppCommand::ActivateSearch
        } else if *id == self.settings {
            AppCommand::OpenSettings
        } else if *id == self.quit {
            AppCommand::Quit
        } else {
            return None;
        };

        Some(command)
    }
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    menu_ids: TrayMenuIds,
    indicators: Indicators,
}

impl TrayManager {
    /// Create the tray icon showing `indicators`.
    #[track_caller]
    #[instrument]
    pub fn new(indicators: Indicators) -> AppResult<Self> {
        let menu = Menu::new();

        let toggle_record = MenuItem::new("Toggle recording", true, None);
        let toggle_pause = MenuItem::new("Pause/resume recording", true, None);
        let toggle_replay = MenuItem::new("Toggle replay buffer", true, None);
        let save_replay = MenuItem::new("Save replay buffer", true, None);
        let find_window = MenuItem::new("Find window…", true, None);
        let settings = MenuItem::new("Settings", true, None);
        let quit = MenuItem::new("Quit", true, None);

        let menu_ids = TrayMenuIds {
            toggle_record: toggle_record.id().clone(),
            toggle_pause: toggle_pause.id().clone(),
            toggle_replay: toggle_replay.id().clone(),
            save_replay: save_replay.id().clone(),
            find_window: find_window.id().clone(),
            settings: settings.id().clone(),
            quit: quit.id().clone(),
        };

        let separator = PredefinedMenuItem::separator();

        menu.append_items(&[
            &toggle_record,
            &toggle_pause,
            &toggle_replay,
            &save_replay,
            &separator,
            &find_window,
            &settings,
            &quit,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(indicator_icon::tooltip(indicators))
            .with_menu(Box::new(menu))
            .with_icon(Self::build_icon(indicators)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            menu_ids,
            indicators,
        })
    }

    /// Repaint icon and tooltip. A no-op when nothing changed.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_indicators(&mut self, indicators: Indicators) -> AppResult<()> {
        if indicators == self.indicators {
            debug!("Indicators unchanged, skipping repaint");
            return Ok(());
        }

        self.tray_icon
            .set_icon(Some(Self::build_icon(indicators)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(indicator_icon::tooltip(indicators)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.indicators = indicators;

        Ok(())
    }

    #[track_caller]
    fn build_icon(indicators: Indicators) -> AppResult<Icon> {
        let rgba = indicator_icon::render(indicators);
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Menu item ids.
    pub fn menu_ids(&self) -> &TrayMenuIds {
        &self.menu_ids
    }
}
