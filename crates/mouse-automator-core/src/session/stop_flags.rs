use crate::SessionKind;

use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flags, one per session kind.
///
/// Owned by a [`SessionController`](crate::SessionController) and shared with
/// the sessions it spawns. A flag is cleared when its session starts, set by
/// a stop request and polled by the running session. Setting it again is
/// harmless.
#[derive(Debug, Default)]
pub struct StopFlags {
    recording: AtomicBool,
    playback: AtomicBool,
}

impl StopFlags {
    /// Ask the running session of `kind` to stop at its next poll point.
    pub fn request_stop(&self, kind: SessionKind) {
        self.flag(kind).store(true, Ordering::Release);
    }

    /// Ask every running session to stop.
    pub fn request_stop_all(&self) {
        self.request_stop(SessionKind::Recording);
        self.request_stop(SessionKind::Playback);
    }

    /// Clear the flag for a session that is about to start.
    pub fn reset(&self, kind: SessionKind) {
        self.flag(kind).store(false, Ordering::Release);
    }

    /// Whether a stop has been requested since the last reset.
    pub fn is_stop_requested(&self, kind: SessionKind) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    fn flag(&self, kind: SessionKind) -> &AtomicBool {
        match kind {
            SessionKind::Recording => &self.recording,
            SessionKind::Playback => &self.playback,
        }
    }
}
