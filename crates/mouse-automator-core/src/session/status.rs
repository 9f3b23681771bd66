use std::fmt;

/// The two independent session kinds a controller runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// Capturing pointer input into an action log.
    Recording,
    /// Replaying an action log with synthesized input.
    Playback,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Recording => f.write_str("recording"),
            SessionKind::Playback => f.write_str("playback"),
        }
    }
}

/// Lifecycle of the most recent session of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started.
    Idle,
    /// A session is running and no stop has been requested.
    Running,
    /// A stop was requested; the session exits at its next poll point.
    StopRequested,
    /// The last session has finished.
    Stopped,
}

impl SessionState {
    /// True while a session task is still alive.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::Running | SessionState::StopRequested)
    }
}

/// Human-readable status shown by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing running.
    Idle,
    /// Recording countdown, in seconds remaining.
    StartingIn(u32),
    /// Capturing pointer input.
    Recording,
    /// Replaying an action log.
    Playback,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => f.write_str("Idle"),
            Status::StartingIn(n) => write!(f, "Starting in {}...", n),
            Status::Recording => f.write_str("Recording in progress"),
            Status::Playback => f.write_str("Playback in progress"),
        }
    }
}
