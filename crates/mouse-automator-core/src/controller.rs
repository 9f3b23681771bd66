//! Session lifecycle: at most one recording and one playback at a time.
//!
//! The controller never waits on a session. Start and stop calls return
//! immediately; progress is reported through [`ControllerEvent`]s.

use crate::{
    ActionLog, CoreError, CoreResult, EventSource, PlaybackReport, PlaybackSession, SessionKind,
    SessionSettings, SessionState, Status, StopFlags, SynthFactory, ThreadSleep,
    session::RecordingSession,
};

use std::{
    panic::Location,
    sync::{Arc, Mutex, MutexGuard},
};

use error_location::ErrorLocation;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, instrument};

/// Notifications from the controller and its sessions to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A session kind changed status.
    StatusChanged {
        /// Which session changed.
        kind: SessionKind,
        /// Its new status.
        status: Status,
    },
    /// A recording finished and its log replaced the previous one.
    RecordingComplete {
        /// Number of actions captured.
        actions: usize,
    },
    /// Playback was requested but nothing has been recorded.
    NoMovementsRecorded,
    /// A session ended with an error.
    SessionFailed {
        /// Which session failed.
        kind: SessionKind,
        /// Human-readable cause.
        reason: String,
    },
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session was spawned.
    Started,
    /// A session of this kind is already running; the request was ignored.
    AlreadyRunning,
    /// Playback was refused because the action log is empty.
    NoMovementsRecorded,
}

/// Owns the stop flags, the current action log and the session tasks.
pub struct SessionController {
    source: Arc<dyn EventSource>,
    synth_factory: Arc<dyn SynthFactory>,
    settings: SessionSettings,
    flags: Arc<StopFlags>,
    log: Arc<Mutex<ActionLog>>,
    recording: Mutex<Option<JoinHandle<()>>>,
    playback: Mutex<Option<JoinHandle<()>>>,
    events: mpsc::UnboundedSender<ControllerEvent>,
    runtime: Handle,
}

impl SessionController {
    /// Create a controller that spawns sessions on `runtime`.
    ///
    /// Returns the controller and the receiver for its events.
    pub fn new(
        source: Arc<dyn EventSource>,
        synth_factory: Arc<dyn SynthFactory>,
        settings: SessionSettings,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();

        let controller = Self {
            source,
            synth_factory,
            settings,
            flags: Arc::new(StopFlags::default()),
            log: Arc::new(Mutex::new(ActionLog::default())),
            recording: Mutex::new(None),
            playback: Mutex::new(None),
            events,
            runtime,
        };

        (controller, events_rx)
    }

    /// Start a recording session unless one is already running.
    ///
    /// Clears the current action log.
    #[instrument(skip(self))]
    pub fn start_recording(&self) -> StartOutcome {
        let mut slot = lock(&self.recording);

        if is_alive(&slot) {
            debug!("Recording already running, start ignored");
            return StartOutcome::AlreadyRunning;
        }

        *lock(&self.log) = ActionLog::default();

        let session = RecordingSession::new(
            Arc::clone(&self.source),
            Arc::clone(&self.flags),
            &self.settings,
            self.events.clone(),
        );
        let session_id = session.session_id();
        let log_slot = Arc::clone(&self.log);
        let events = self.events.clone();

        *slot = Some(self.runtime.spawn(async move {
            match session.run().await {
                Ok(log) => {
                    let actions = log.len();
                    *lock(&log_slot) = log;
                    let _ = events.send(ControllerEvent::RecordingComplete { actions });
                }
                Err(e) => {
                    error!(session_id = %session_id, error = ?e, "Recording failed");
                    let _ = events.send(ControllerEvent::SessionFailed {
                        kind: SessionKind::Recording,
                        reason: e.to_string(),
                    });
                }
            }

            let _ = events.send(ControllerEvent::StatusChanged {
                kind: SessionKind::Recording,
                status: Status::Idle,
            });
        }));

        info!(session_id = %session_id, "Recording session spawned");

        StartOutcome::Started
    }

    /// Ask the running recording to stop. Idempotent.
    #[instrument(skip(self))]
    pub fn stop_recording(&self) {
        self.flags.request_stop(SessionKind::Recording);
    }

    /// Start replaying the current action log unless playback is running.
    ///
    /// An empty log is refused with [`StartOutcome::NoMovementsRecorded`]
    /// and a matching event for the front-end.
    #[instrument(skip(self))]
    pub fn start_playback(&self) -> StartOutcome {
        let log = self.action_log();

        if log.is_empty() {
            info!("Playback requested with no movements recorded");
            let _ = self.events.send(ControllerEvent::NoMovementsRecorded);
            return StartOutcome::NoMovementsRecorded;
        }

        let mut slot = lock(&self.playback);

        if is_alive(&slot) {
            debug!("Playback already running, start ignored");
            return StartOutcome::AlreadyRunning;
        }

        let session =
            PlaybackSession::new(log, Arc::clone(&self.flags), self.settings.pause.clone());
        let session_id = session.session_id();
        let factory = Arc::clone(&self.synth_factory);
        let events = self.events.clone();

        *slot = Some(self.runtime.spawn(async move {
            let _ = events.send(ControllerEvent::StatusChanged {
                kind: SessionKind::Playback,
                status: Status::Playback,
            });

            let joined = tokio::task::spawn_blocking(move || -> CoreResult<PlaybackReport> {
                let mut synth = factory.create()?;
                session.run(synth.as_mut(), &mut ThreadSleep, &mut rand::thread_rng())
            })
            .await
            .map_err(|e| CoreError::SessionTaskFailed {
                reason: format!("Playback task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            });

            match joined.and_then(|result| result) {
                Ok(report) => {
                    debug!(session_id = %session_id, ?report, "Playback finished");
                }
                Err(e) => {
                    error!(session_id = %session_id, error = ?e, "Playback failed");
                    let _ = events.send(ControllerEvent::SessionFailed {
                        kind: SessionKind::Playback,
                        reason: e.to_string(),
                    });
                }
            }

            let _ = events.send(ControllerEvent::StatusChanged {
                kind: SessionKind::Playback,
                status: Status::Idle,
            });
        }));

        info!(session_id = %session_id, "Playback session spawned");

        StartOutcome::Started
    }

    /// Ask the running playback to stop. Idempotent.
    #[instrument(skip(self))]
    pub fn stop_playback(&self) {
        self.flags.request_stop(SessionKind::Playback);
    }

    /// Stop the active recording, or playback if nothing is recording.
    #[instrument(skip(self))]
    pub fn stop_current(&self) {
        if self.state(SessionKind::Recording).is_active() {
            self.stop_recording();
        } else {
            self.stop_playback();
        }
    }

    /// Ask every session to stop. Safe to call when nothing is running.
    #[instrument(skip(self))]
    pub fn stop_all(&self) {
        self.flags.request_stop_all();
        info!("Stop requested for all sessions");
    }

    /// Lifecycle state of the latest session of `kind`.
    pub fn state(&self, kind: SessionKind) -> SessionState {
        let slot = match kind {
            SessionKind::Recording => lock(&self.recording),
            SessionKind::Playback => lock(&self.playback),
        };

        match slot.as_ref() {
            None => SessionState::Idle,
            Some(handle) if handle.is_finished() => SessionState::Stopped,
            Some(_) if self.flags.is_stop_requested(kind) => SessionState::StopRequested,
            Some(_) => SessionState::Running,
        }
    }

    /// Snapshot of the most recent completed recording.
    pub fn action_log(&self) -> ActionLog {
        lock(&self.log).clone()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.flags.request_stop_all();
    }
}

fn is_alive(slot: &Option<JoinHandle<()>>) -> bool {
    slot.as_ref().is_some_and(|handle| !handle.is_finished())
}

// Guarded values stay valid if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
