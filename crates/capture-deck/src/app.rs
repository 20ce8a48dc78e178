use crate::{
    AppCommand, AppResult, EventListener, ObsClient, ToastNotifier, TrayMenuIds, UiCommand,
    config::Config, overlay::overlay_title, window_system::DesktopWindowSystem,
};

use capture_deck_core::{CaptureEvent, Indicators, RecordingStateMachine, SearchController};

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// Main application state.
///
/// Runs on the async runtime thread and is the only place the control and
/// search state machines are touched. Tray and overlay updates go back to
/// the main thread via `ui_proxy` because `TrayIcon` and the overlay window
/// are `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) control: RecordingStateMachine<ObsClient, ToastNotifier>,
    pub(crate) search: SearchController<DesktopWindowSystem>,
    pub(crate) events: Option<EventListener>,
    pub(crate) ui_proxy: EventLoopProxy<UiCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) menu_ids: TrayMenuIds,
    pub(crate) config_path: PathBuf,
    pub(crate) shown_indicators: Indicators,
}

impl App {
    /// Connects to the capture server and builds both state machines.
    ///
    /// The event listener is opened before the status seed so no transition
    /// between the two is lost.
    ///
    /// # Errors
    ///
    /// Returns error if either capture server session cannot be opened or
    /// the initial status query fails.
    #[track_caller]
    #[instrument(skip_all)]
    pub(crate) fn connect(
        config: &Config,
        ui_proxy: EventLoopProxy<UiCommand>,
        command_rx: mpsc::Receiver<AppCommand>,
        shutdown_tx: watch::Sender<bool>,
        menu_ids: TrayMenuIds,
        config_path: PathBuf,
    ) -> AppResult<Self> {
        let events = EventListener::connect(&config.obs)?;
        let client = ObsClient::connect(&config.obs)?;
        let control = RecordingStateMachine::connect(
            client,
            ToastNotifier::new(config.notifications.enabled),
        )?;
        let search = SearchController::new(DesktopWindowSystem::new(), config.search.debounce());

        Ok(Self {
            control,
            search,
            events: Some(events),
            ui_proxy,
            command_rx,
            shutdown_tx,
            menu_ids,
            config_path,
            shown_indicators: Indicators::default(),
        })
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Capture Deck starting");

        // MenuEvent::receiver() is a crossbeam receiver with a blocking
        // recv(). The forwarder stops at the first failed send after
        // tray_event_rx is dropped.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        let (capture_event_tx, mut capture_event_rx) = mpsc::channel::<CaptureEvent>(64);
        let mut events_open = false;
        if let Some(listener) = self.events.take() {
            tokio::task::spawn_blocking(move || listener.forward(capture_event_tx));
            events_open = true;
        }

        self.sync_indicators();

        loop {
            let deadline = self.search.deadline();

            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    match self.menu_ids.command_for(&event.id) {
                        Some(cmd) => {
                            if !self.handle_command(cmd) {
                                break;
                            }
                        }
                        None => debug!(id = ?event.id, "Ignoring unknown menu item"),
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }

                event = capture_event_rx.recv(), if events_open => {
                    match event {
                        Some(event) => self.control.handle_event(event),
                        None => {
                            warn!("Capture server event stream closed, indicators will no longer update");
                            events_open = false;
                        }
                    }
                }

                _ = Self::sleep_until(deadline) => {
                    if self.search.fire_if_due(Instant::now()) {
                        self.refresh_overlay();
                    }
                }
            }

            self.sync_indicators();
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);
        info!("Capture Deck shut down successfully");

        Ok(())
    }

    /// Applies one command. Returns `false` once the app should exit.
    #[instrument(skip(self))]
    fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::ToggleRecord => {
                if let Err(e) = self.control.toggle_record() {
                    error!(error = ?e, "Failed to toggle recording");
                }
            }
            AppCommand::TogglePause => {
                if let Err(e) = self.control.toggle_pause() {
                    error!(error = ?e, "Failed to toggle pause");
                }
            }
            AppCommand::ToggleReplay => {
                if let Err(e) = self.control.toggle_replay() {
                    error!(error = ?e, "Failed to toggle replay buffer");
                }
            }
            AppCommand::SaveReplay => match self.control.save_replay() {
                Ok(true) => info!("Replay buffer save requested"),
                Ok(false) => {}
                Err(e) => error!(error = ?e, "Failed to save replay buffer"),
            },
            AppCommand::ActivateSearch => match self.search.activate() {
                Ok(()) => {
                    info!(window_count = self.search.results().len(), "Overlay shown");
                    self.send_ui(UiCommand::OpenOverlay {
                        title: self.current_title(),
                    });
                }
                Err(e) => {
                    error!(error = ?e, "Failed to build window snapshot");
                    self.send_ui(UiCommand::HideOverlay);
                }
            },
            AppCommand::QueryChanged { text } => {
                self.search.on_query_changed(&text, Instant::now());
                self.refresh_overlay();
            }
            AppCommand::MoveHighlight { delta } => {
                self.search.move_highlight(delta);
                self.refresh_overlay();
            }
            AppCommand::SelectHighlighted => {
                if let Some(handle) = self.search.select_highlighted() {
                    info!(handle = %handle, "Window selected");
                }
                self.send_ui(UiCommand::HideOverlay);
            }
            AppCommand::DismissSearch => {
                self.search.escape();
                self.send_ui(UiCommand::HideOverlay);
            }
            AppCommand::OpenSettings => {
                if let Err(e) = open::that(&self.config_path) {
                    error!(error = ?e, config_path = ?self.config_path, "Failed to open settings");
                } else {
                    info!("Opened settings file");
                }
            }
            AppCommand::Quit => {
                info!("Quit requested");
                if let Err(e) = self.control.quit() {
                    error!(error = ?e, "Failed to stop outputs before exit");
                }
                self.send_ui(UiCommand::Shutdown);
                return false;
            }
        }

        true
    }

    /// Sends the indicator tuple to the tray, only when it changed.
    fn sync_indicators(&mut self) {
        let indicators = self.control.indicators();
        if indicators == self.shown_indicators {
            return;
        }

        self.shown_indicators = indicators;
        self.send_ui(UiCommand::SetIndicators(indicators));
    }

    fn refresh_overlay(&self) {
        if self.search.phase().is_active() {
            self.send_ui(UiCommand::RefreshOverlay {
                title: self.current_title(),
            });
        }
    }

    fn current_title(&self) -> String {
        overlay_title(
            self.search.query(),
            self.search.results(),
            self.search.highlighted(),
        )
    }

    fn send_ui(&self, cmd: UiCommand) {
        if let Err(e) = self.ui_proxy.send_event(cmd) {
            error!(error = ?e, "Failed to send command to UI thread");
        }
    }

    async fn sleep_until(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => {
                tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
            }
            None => std::future::pending().await,
        }
    }
}
