use crate::config::{default_pause_every, default_pause_max_secs, default_pause_min_secs};

use serde::{Deserialize, Serialize};

/// Playback pause configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Pause after every Nth completed repetition. Must be greater than 0.
    #[serde(default = "default_pause_every")]
    pub pause_every: u64,

    /// Shortest pause between repetitions, in seconds.
    #[serde(default = "default_pause_min_secs")]
    pub pause_min_secs: f64,

    /// Longest pause between repetitions, in seconds.
    #[serde(default = "default_pause_max_secs")]
    pub pause_max_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            pause_every: default_pause_every(),
            pause_min_secs: default_pause_min_secs(),
            pause_max_secs: default_pause_max_secs(),
        }
    }
}
