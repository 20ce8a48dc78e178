//! Capture-Deck: tray control panel for a capture server plus a global-hotkey
//! fuzzy window switcher.

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod indicator_icon;
mod obs;
mod overlay;
mod toast_notifier;
mod tray_manager;
mod ui_command;
mod window_system;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    obs::{EventListener, ObsClient},
    overlay::OverlayWindow,
    toast_notifier::ToastNotifier,
    tray_manager::{TrayManager, TrayMenuIds},
    ui_command::UiCommand,
};

use crate::config::Config;

use capture_deck_core::Indicators;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "capture_deck=debug,capture_deck_core=debug";

/// Application entry point.
fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let event_loop = EventLoopBuilder::<UiCommand>::with_user_event().build();
    let ui_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(Indicators::default()) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations. Dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut overlay: Option<OverlayWindow> = None;
    let mut command_tx: Option<mpsc::Sender<AppCommand>> = None;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    UiCommand::SetIndicators(indicators) => {
                        if let Err(e) = tray_manager.update_indicators(indicators) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    UiCommand::OpenOverlay { title } => {
                        if let Some(overlay) = overlay.as_mut() {
                            overlay.open(&title);
                        }
                    }
                    UiCommand::RefreshOverlay { title } => {
                        if let Some(overlay) = overlay.as_ref() {
                            overlay.refresh(&title);
                        }
                    }
                    UiCommand::HideOverlay => {
                        if let Some(overlay) = overlay.as_ref() {
                            overlay.hide();
                        }
                    }
                    UiCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::WindowEvent {
                window_id, event, ..
            } => {
                if let (Some(overlay), Some(command_tx)) = (overlay.as_mut(), command_tx.as_ref())
                    && overlay.owns(window_id)
                    && let Some(cmd) = overlay.handle_event(&event)
                    && let Err(e) = command_tx.try_send(cmd)
                {
                    error!(error = ?e, "Failed to forward overlay input");
                }
            }
            Event::NewEvents(StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let config_path = match Config::config_path() {
                    Ok(path) => path,
                    Err(e) => {
                        error!("Failed to resolve config path: {:?}", e);
                        std::process::exit(1);
                    }
                };

                overlay = match OverlayWindow::new(target) {
                    Ok(window) => Some(window),
                    Err(e) => {
                        error!("Failed to create overlay: {:?}", e);
                        std::process::exit(1);
                    }
                };

                // Register hotkey on the main thread. tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkey_id) =
                    match HotkeyHandler::register_hotkey(&config.search.hotkey) {
                        Ok(pair) => pair,
                        Err(e) => {
                            error!("Failed to register hotkey: {:?}", e);
                            std::process::exit(1);
                        }
                    };
                hotkey_manager = Some(manager);

                let (tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                command_tx = Some(tx.clone());

                let ui_proxy = ui_proxy.clone();
                let menu_ids = tray_manager.menu_ids().clone();

                // All state machines live on this thread's runtime. The tray,
                // the overlay and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Builder::new_current_thread()
                        .enable_time()
                        .build()
                    {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let app = match App::connect(
                            &config,
                            ui_proxy,
                            command_rx,
                            shutdown_tx,
                            menu_ids,
                            config_path,
                        ) {
                            Ok(app) => app,
                            Err(e) => {
                                error!(
                                    url = %config.obs.url(),
                                    "Capture server unavailable, start OBS with the websocket \
                                     server enabled and try again: {:?}",
                                    e
                                );
                                std::process::exit(1);
                            }
                        };

                        let hotkey_handler = HotkeyHandler::new(hotkey_id, tx);

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
