#[allow(clippy::module_inception)]
mod config;
mod hotkey_config;
mod playback_config;
mod recording_config;

pub(crate) use {
    config::Config, hotkey_config::HotkeyConfig, playback_config::PlaybackConfig,
    recording_config::RecordingConfig,
};

pub(crate) const DEFAULT_COUNTDOWN_SECS: u32 = 3;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 10;
pub(crate) const DEFAULT_PAUSE_EVERY: u64 = 2;
pub(crate) const DEFAULT_PAUSE_MIN_SECS: f64 = 3.0;
pub(crate) const DEFAULT_PAUSE_MAX_SECS: f64 = 7.0;
pub(crate) const DEFAULT_STOP_KEY: &str = "q";

pub(crate) fn default_countdown_secs() -> u32 {
    DEFAULT_COUNTDOWN_SECS
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_pause_every() -> u64 {
    DEFAULT_PAUSE_EVERY
}

pub(crate) fn default_pause_min_secs() -> f64 {
    DEFAULT_PAUSE_MIN_SECS
}

pub(crate) fn default_pause_max_secs() -> f64 {
    DEFAULT_PAUSE_MAX_SECS
}

pub(crate) fn default_stop_key() -> String {
    DEFAULT_STOP_KEY.to_string()
}
