mod pause;
mod playback;
mod recording;
mod settings;
mod status;
mod stop_flags;

pub(crate) use recording::RecordingSession;

pub use {
    pause::{Pause, ThreadSleep},
    playback::{PlaybackReport, PlaybackSession},
    settings::{PausePolicy, SessionSettings},
    status::{SessionKind, SessionState, Status},
    stop_flags::StopFlags,
};
