//! Global hotkey bridge for the window search overlay.
//!
//! Registers the configured chord and turns each press into an
//! `ActivateSearch` command for the app task.

use crate::{AppCommand, AppError, AppResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Parses a chord such as `ctrl+super+Slash`.
#[track_caller]
pub fn parse_hotkey(chord: &str) -> AppResult<HotKey> {
    chord
        .parse::<HotKey>()
        .map_err(|e| AppError::HotkeyRegistrationFailed {
            reason: format!("Invalid hotkey {:?}: {}", chord, e),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Forwards presses of one registered hotkey to the app task.
pub struct HotkeyHandler {
    hotkey_id: u32,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Register `chord` as the global hotkey.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey(chord: &str) -> AppResult<(GlobalHotKeyManager, u32)> {
        let hotkey = parse_hotkey(chord)?;

        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", chord, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = chord, "Global hotkey registered");

        Ok((manager, hotkey.id()))
    }

    /// Create a handler for a previously registered hotkey.
    pub fn new(hotkey_id: u32, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            hotkey_id,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop until shutdown is signalled.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // GlobalHotKeyEvent::receiver() is a crossbeam receiver with a
        // blocking recv(). The forwarder stops at the first failed send
        // after event_rx is dropped.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if self.is_activation(&event) {
                        self.activate().await?;
                    }
                }
            }
        }

        drop(event_rx);

        // The forwarder may be parked in recv() until another hotkey event
        // arrives; it is cleaned up on exit either way.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Only presses of our chord activate; releases are ignored.
    pub fn is_activation(&self, event: &GlobalHotKeyEvent) -> bool {
        event.id == self.hotkey_id && event.state == HotKeyState::Pressed
    }

    async fn activate(&self) -> AppResult<()> {
        self.command_tx
            .send(AppCommand::ActivateSearch)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send ActivateSearch: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Search activation requested");

        Ok(())
    }
}
