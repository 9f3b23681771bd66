//! Mouse Automator: record mouse movements and clicks, replay them in a loop.

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod notice;
mod status_board;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    status_board::StatusBoard,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::{MenuIds, TrayManager},
};

use crate::config::Config;

use std::sync::Arc;

use mouse_automator_core::{
    EnigoSynthFactory, InputHook, KeyPress, SessionController, SessionSettings,
};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "mouse_automator=debug,mouse_automator_core=debug";

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Read once up front: the tray labels need the stop key before Init.
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(&config.hotkey.stop_key) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut config = Some(config);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::Render(board) => {
                    if let Err(e) = tray_manager.update_state(board) {
                        error!(error = ?e, "Failed to update tray icon");
                    }
                }
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::NewEvents(tao::event::StartCause::Init) => {
                let Some(config) = config.take() else {
                    return;
                };

                let (input_hook, key_rx, settings) = match start_capture(&config) {
                    Ok(started) => started,
                    Err(e) => {
                        error!("Failed to start input capture: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                let tray_proxy = tray_proxy.clone();
                let menu_ids = tray_manager.menu_ids().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let (controller, controller_events) = SessionController::new(
                            input_hook,
                            Arc::new(EnigoSynthFactory),
                            settings,
                            tokio::runtime::Handle::current(),
                        );

                        let hotkey_handler =
                            HotkeyHandler::new(config.hotkey.stop_key.clone(), command_tx);

                        let app = App {
                            controller,
                            controller_events,
                            tray_proxy,
                            command_rx,
                            shutdown_tx,
                            menu_ids,
                            board: StatusBoard::default(),
                        };

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(key_rx, shutdown_rx).await {
                                    error!(error = ?e, "Stop key handler error");
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
    });
}

/// Resolve session timings and install the OS input hook.
fn start_capture(
    config: &Config,
) -> AppResult<(
    Arc<InputHook>,
    mpsc::UnboundedReceiver<KeyPress>,
    SessionSettings,
)> {
    let settings = config.session_settings()?;
    let (input_hook, key_rx) = InputHook::spawn()?;

    Ok((input_hook, key_rx, settings))
}
