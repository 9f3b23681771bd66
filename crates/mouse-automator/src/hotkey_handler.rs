//! Global stop key listener.
//!
//! Watches key presses reported by the input hook and sends
//! [`AppCommand::StopAll`] when the configured stop key is pressed anywhere.
//! Keys are observed, never intercepted: other applications still receive
//! them.

use crate::{AppCommand, AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use mouse_automator_core::KeyPress;
use tokio::sync::{mpsc, watch};
use tracing::{info, instrument, warn};

/// Global stop key handler.
pub struct HotkeyHandler {
    stop_key: String,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Create a handler that stops everything when `stop_key` is pressed.
    pub fn new(stop_key: impl Into<String>, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            stop_key: stop_key.into(),
            command_tx,
        }
    }

    /// Run the stop key listener loop.
    ///
    /// Returns when a shutdown signal is received or the input hook goes away.
    #[instrument(skip(self, key_rx, shutdown_rx), fields(stop_key = %self.stop_key))]
    pub async fn run(
        &self,
        mut key_rx: mpsc::UnboundedReceiver<KeyPress>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> AppResult<()> {
        info!("Stop key listener started");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Stop key listener shutting down");
                    break;
                }
                key = key_rx.recv() => match key {
                    Some(key) => {
                        self.handle_key_press(&key).await?;
                    }
                    None => {
                        warn!("Input hook closed, stop key unavailable");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Returns true if the press was the stop key and StopAll was sent.
    ///
    /// Presses without a decodable character are ignored.
    pub(crate) async fn handle_key_press(&self, key: &KeyPress) -> AppResult<bool> {
        if !key.matches(&self.stop_key) {
            return Ok(false);
        }

        self.command_tx
            .send(AppCommand::StopAll)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send StopAll: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Stop key pressed, stopping all sessions");

        Ok(true)
    }
}
