use crate::{
    ActionBuffer, ActionLog, ActionSink, ControllerEvent, CoreResult, EventSource, SessionKind,
    SessionSettings, Status, StopFlags,
};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Captures pointer input into an [`ActionLog`] until its stop flag is set.
pub(crate) struct RecordingSession {
    session_id: Uuid,
    source: Arc<dyn EventSource>,
    flags: Arc<StopFlags>,
    countdown_secs: u32,
    poll_interval: Duration,
    events: mpsc::UnboundedSender<ControllerEvent>,
}

impl RecordingSession {
    /// Prepare a session and clear the recording stop flag.
    ///
    /// The flag is cleared here, before the session is spawned, so a stop
    /// requested right after start is not overwritten.
    pub(crate) fn new(
        source: Arc<dyn EventSource>,
        flags: Arc<StopFlags>,
        settings: &SessionSettings,
        events: mpsc::UnboundedSender<ControllerEvent>,
    ) -> Self {
        flags.reset(SessionKind::Recording);

        Self {
            session_id: Uuid::new_v4(),
            source,
            flags,
            countdown_secs: settings.countdown_secs,
            poll_interval: settings.poll_interval,
            events,
        }
    }

    pub(crate) fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Run the countdown, then capture until stopped.
    ///
    /// Returns an empty log if stopped during the countdown.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub(crate) async fn run(self) -> CoreResult<ActionLog> {
        for remaining in (1..=self.countdown_secs).rev() {
            self.emit(Status::StartingIn(remaining));
            if self.wait_or_stop(COUNTDOWN_STEP).await {
                info!("Recording cancelled during countdown");
                return Ok(ActionLog::default());
            }
        }

        let buffer = Arc::new(ActionBuffer::default());
        let sink: Arc<dyn ActionSink> = buffer.clone();
        let handle = self.source.begin(sink)?;

        self.emit(Status::Recording);
        info!("Recording started");

        let started_at = Instant::now();
        while !self.stop_requested() {
            tokio::time::sleep(self.poll_interval).await;
        }

        self.source.end(handle);
        let log = buffer.take_log();

        info!(
            duration_ms = started_at.elapsed().as_millis(),
            moves = log.move_count(),
            clicks = log.click_count(),
            "Recording stopped"
        );

        Ok(log)
    }

    /// Sleep for `duration` in poll-sized steps. Returns true if a stop was
    /// requested before it elapsed.
    async fn wait_or_stop(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;

        loop {
            if self.stop_requested() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            tokio::time::sleep(remaining.min(self.poll_interval)).await;
        }
    }

    fn stop_requested(&self) -> bool {
        self.flags.is_stop_requested(SessionKind::Recording)
    }

    fn emit(&self, status: Status) {
        debug!(%status, "Recording status");
        let _ = self.events.send(ControllerEvent::StatusChanged {
            kind: SessionKind::Recording,
            status,
        });
    }
}
