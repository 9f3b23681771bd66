use crate::MouseButton;

use error_location::ErrorLocation;
use thiserror::Error;

/// Record/replay errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The OS input hook could not be installed or subscribed to.
    #[error("Input capture failed: {reason} {location}")]
    CaptureFailed {
        /// Description of the capture failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Synthesizing a pointer move or click failed.
    #[error("Input synthesis failed: {reason} {location}")]
    SynthesisFailed {
        /// Description of the synthesis failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The platform cannot synthesize a click for this button.
    #[error("Unsupported mouse button: {button:?} {location}")]
    UnsupportedButton {
        /// Button that was recorded but cannot be replayed.
        button: MouseButton,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A session task panicked or was cancelled by the runtime.
    #[error("Session task failed: {reason} {location}")]
    SessionTaskFailed {
        /// Description of the join failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
