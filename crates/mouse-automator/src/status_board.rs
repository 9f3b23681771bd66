use crate::TrayIconState;

use mouse_automator_core::{ControllerEvent, SessionKind, Status};

/// Latest status of each session kind, as shown in the tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBoard {
    /// Recording status, including the countdown.
    pub recording: Status,
    /// Playback status.
    pub playback: Status,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            recording: Status::Idle,
            playback: Status::Idle,
        }
    }
}

impl StatusBoard {
    /// Fold a controller event into the board. Returns true if it changed.
    pub fn apply(&mut self, event: &ControllerEvent) -> bool {
        let ControllerEvent::StatusChanged { kind, status } = event else {
            return false;
        };

        let slot = match kind {
            SessionKind::Recording => &mut self.recording,
            SessionKind::Playback => &mut self.playback,
        };

        let changed = *slot != *status;
        *slot = *status;
        changed
    }

    /// Icon to show; recording states take precedence over playback.
    pub fn tray_state(&self) -> TrayIconState {
        match (self.recording, self.playback) {
            (Status::StartingIn(_), _) => TrayIconState::Countdown,
            (Status::Recording, _) => TrayIconState::Recording,
            (_, Status::Playback) => TrayIconState::Playback,
            _ => TrayIconState::Idle,
        }
    }

    /// Tooltip text, e.g. `Mouse Automator - Recording in progress`.
    pub fn tooltip(&self) -> String {
        let status = match self.tray_state() {
            TrayIconState::Idle => Status::Idle,
            TrayIconState::Countdown | TrayIconState::Recording => self.recording,
            TrayIconState::Playback => self.playback,
        };
        format!("Mouse Automator - {}", status)
    }

    /// Label for the record menu item.
    pub fn record_label(&self, stop_key: &str) -> String {
        match self.recording {
            Status::StartingIn(n) => format!("Starting in {}...", n),
            Status::Recording => format!("Press {} to Stop Recording", stop_key.to_uppercase()),
            _ => "Start Recording".to_string(),
        }
    }

    /// Label for the play menu item.
    pub fn play_label(&self, stop_key: &str) -> String {
        match self.playback {
            Status::Playback => format!("Press {} to Stop Playback", stop_key.to_uppercase()),
            _ => "Play".to_string(),
        }
    }
}
