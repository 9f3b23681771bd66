use crate::config::default_stop_key;

use serde::{Deserialize, Serialize};

/// Global stop key configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Character that stops every session when pressed anywhere.
    #[serde(default = "default_stop_key")]
    pub stop_key: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            stop_key: default_stop_key(),
        }
    }
}
