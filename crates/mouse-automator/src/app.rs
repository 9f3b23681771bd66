use crate::{
    AppCommand, AppResult, MenuIds, StatusBoard, TrayCommand, config::Config,
    notice::{self, NO_MOVEMENTS_BODY, NO_MOVEMENTS_SUMMARY},
};

use mouse_automator_core::{ControllerEvent, SessionController, StartOutcome};
use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// Main application state.
///
/// Runs on the async runtime thread. Tray updates go back to the main
/// thread through `tray_proxy` because `TrayIcon` is `!Send` and must stay
/// on the UI thread.
pub struct App {
    pub(crate) controller: SessionController,
    pub(crate) controller_events: mpsc::UnboundedReceiver<ControllerEvent>,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) menu_ids: MenuIds,
    pub(crate) board: StatusBoard,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Mouse Automator starting");

        // MenuEvent::receiver() is a blocking crossbeam receiver; forward it
        // from one blocking task. Dropping menu_event_rx ends the forwarder
        // on its next event.
        let (menu_event_tx, mut menu_event_rx) = mpsc::channel(32);
        let menu_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if menu_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = menu_event_rx.recv() => {
                    match self.menu_ids.command_for(&event.id) {
                        Some(cmd) => {
                            if !self.handle_command(cmd) {
                                break;
                            }
                        }
                        None => debug!(menu_id = ?event.id, "Ignoring unknown menu item"),
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }

                Some(event) = self.controller_events.recv() => {
                    self.handle_controller_event(event);
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        self.controller.stop_all();
        let _ = self.tray_proxy.send_event(TrayCommand::Shutdown);

        drop(menu_event_rx);

        match tokio::time::timeout(std::time::Duration::from_secs(1), menu_handle).await {
            Ok(Ok(())) => info!("Menu event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Menu event forwarder task panicked"),
            Err(_) => info!(
                "Menu event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);
        info!("Mouse Automator shut down successfully");

        Ok(())
    }

    /// Apply a command. Returns false when the app should exit.
    #[instrument(skip(self))]
    fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::StartRecording => {
                if self.controller.start_recording() == StartOutcome::AlreadyRunning {
                    debug!("Recording already in progress");
                }
            }
            AppCommand::StartPlayback => match self.controller.start_playback() {
                StartOutcome::Started => info!("Playing movements"),
                StartOutcome::AlreadyRunning => debug!("Playback already in progress"),
                // The controller also emits an event; the notice is shown there.
                StartOutcome::NoMovementsRecorded => {}
            },
            AppCommand::StopCurrent => self.controller.stop_current(),
            // The tray refreshes when each stopped session reports Idle.
            AppCommand::StopAll => self.controller.stop_all(),
            AppCommand::OpenSettings => {
                if let Err(e) = open_settings() {
                    error!(error = ?e, "Failed to open settings");
                }
            }
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                return false;
            }
        }

        true
    }

    #[instrument(skip(self))]
    fn handle_controller_event(&mut self, event: ControllerEvent) {
        if self.board.apply(&event) {
            self.render();
        }

        match event {
            ControllerEvent::StatusChanged { .. } => {}
            ControllerEvent::RecordingComplete { actions } => {
                info!(actions, "Recording complete");
            }
            ControllerEvent::NoMovementsRecorded => {
                warn!("Playback requested before anything was recorded");
                spawn_notice(NO_MOVEMENTS_SUMMARY, NO_MOVEMENTS_BODY.to_string());
            }
            ControllerEvent::SessionFailed { kind, reason } => {
                error!(%kind, %reason, "Session failed");
                spawn_notice("Mouse Automator Error", format!("The {} stopped: {}", kind, reason));
            }
        }
    }

    fn render(&self) {
        if self
            .tray_proxy
            .send_event(TrayCommand::Render(self.board))
            .is_err()
        {
            debug!("Tray event loop closed, status not rendered");
        }
    }
}

fn spawn_notice(summary: &'static str, body: String) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = notice::show_warning(summary, &body) {
            error!(error = ?e, "Failed to show notification");
        }
    });
}

fn open_settings() -> AppResult<()> {
    let path = Config::config_path()?;
    open::that(&path)?;
    info!(path = ?path, "Opened settings file");
    Ok(())
}
