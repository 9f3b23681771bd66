//! Desktop notifications for user-facing warnings.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use notify_rust::Notification;
use tracing::{debug, instrument};

const APP_NAME: &str = "Mouse Automator";

/// Title of the warning shown when playback has nothing to replay.
pub(crate) const NO_MOVEMENTS_SUMMARY: &str = "No Movements Recorded";

/// Body of the warning shown when playback has nothing to replay.
pub(crate) const NO_MOVEMENTS_BODY: &str = "You must record movements before playing them back.";

/// Show a desktop notification. May block briefly on some platforms.
#[track_caller]
#[instrument]
pub(crate) fn show_warning(summary: &str, body: &str) -> AppResult<()> {
    Notification::new()
        .appname(APP_NAME)
        .summary(summary)
        .body(body)
        .show()
        .map(|_| ())
        .map_err(|e| AppError::NotificationFailed {
            reason: format!("Failed to show notification: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    debug!("Notification shown");

    Ok(())
}
