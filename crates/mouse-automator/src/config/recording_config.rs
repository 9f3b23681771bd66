use crate::config::{default_countdown_secs, default_poll_interval_ms};

use serde::{Deserialize, Serialize};

/// Recording session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Seconds of countdown before capture starts (0 = start immediately).
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,

    /// How often the recording checks for a stop request, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}
