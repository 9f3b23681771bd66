//! Configuration management for mouse-automator.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{HotkeyConfig, PlaybackConfig, RecordingConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf, time::Duration};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use mouse_automator_core::{PausePolicy, SessionSettings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Recording countdown and polling.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Pauses between playback repetitions.
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Global stop key.
    #[serde(default)]
    pub hotkey: HotkeyConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::parse(&contents)?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Parse and validate TOML contents. Missing fields take defaults.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Reject values the sessions cannot run with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let invalid = |reason: &str| AppError::ConfigError {
            reason: reason.to_string(),
            location: ErrorLocation::from(Location::caller()),
        };

        if self.recording.poll_interval_ms == 0 {
            return Err(invalid("recording.poll_interval_ms must be greater than 0"));
        }

        if self.playback.pause_every == 0 {
            return Err(invalid("playback.pause_every must be greater than 0"));
        }

        let (min, max) = (self.playback.pause_min_secs, self.playback.pause_max_secs);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
            return Err(invalid(
                "playback pause bounds must be finite, non-negative seconds",
            ));
        }
        if Duration::try_from_secs_f64(max).is_err() {
            return Err(invalid(
                "playback pause bounds are too large to represent as a duration",
            ));
        }
        if min > max {
            return Err(invalid(
                "playback.pause_min_secs must not exceed playback.pause_max_secs",
            ));
        }

        if self.hotkey.stop_key.is_empty() {
            return Err(invalid("hotkey.stop_key must not be empty"));
        }

        Ok(())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Timing settings for the session controller.
    #[track_caller]
    pub fn session_settings(&self) -> AppResult<SessionSettings> {
        Ok(SessionSettings {
            countdown_secs: self.recording.countdown_secs,
            poll_interval: Duration::from_millis(self.recording.poll_interval_ms),
            pause: PausePolicy {
                every: self.playback.pause_every,
                min: pause_duration(self.playback.pause_min_secs)?,
                max: pause_duration(self.playback.pause_max_secs)?,
            },
        })
    }

    /// Location of `config.toml`, creating its directory if needed.
    #[track_caller]
    pub(crate) fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "mouse-automator", "Mouse-Automator")
            .ok_or_else(|| AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();

        config.save()?;

        Ok(config)
    }
}

#[track_caller]
fn pause_duration(secs: f64) -> AppResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|e| AppError::ConfigError {
        reason: format!("Invalid pause duration {}: {}", secs, e),
        location: ErrorLocation::from(Location::caller()),
    })
}
