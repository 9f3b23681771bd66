use crate::{
    Action, ActionLog, CoreError, CoreResult, Pause, PausePolicy, PointerSynth, SessionKind,
    StopFlags,
};

use std::{sync::Arc, time::Duration};

use rand::Rng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// What a finished playback session did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackReport {
    /// Fully completed passes over the log. A pass cut short by a stop is
    /// not counted.
    pub repetitions: u64,
    /// Length of every pause taken, in order.
    pub pauses: Vec<Duration>,
    /// Clicks skipped because the platform cannot synthesize their button.
    pub skipped_clicks: u64,
}

/// Replays an [`ActionLog`] in a loop until its stop flag is set.
///
/// Actions are issued back to back with no recorded timing. After every
/// `policy.every`-th completed repetition the session pauses for a random
/// duration; the pause itself cannot be interrupted.
pub struct PlaybackSession {
    session_id: Uuid,
    log: ActionLog,
    flags: Arc<StopFlags>,
    policy: PausePolicy,
}

impl PlaybackSession {
    /// Prepare a session over `log` and clear the playback stop flag.
    pub fn new(log: ActionLog, flags: Arc<StopFlags>, policy: PausePolicy) -> Self {
        flags.reset(SessionKind::Playback);

        Self {
            session_id: Uuid::new_v4(),
            log,
            flags,
            policy,
        }
    }

    /// Correlation id for this session's log lines.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Replay until stopped. Blocks the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the first synthesis error other than
    /// [`CoreError::UnsupportedButton`], which only skips the click.
    #[instrument(skip_all, fields(session_id = %self.session_id, actions = self.log.len()))]
    pub fn run<S, P, R>(&self, synth: &mut S, pause: &mut P, rng: &mut R) -> CoreResult<PlaybackReport>
    where
        S: PointerSynth + ?Sized,
        P: Pause + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = PlaybackReport::default();

        if self.log.is_empty() {
            warn!("Nothing to replay");
            return Ok(report);
        }

        info!("Playback started");

        while !self.stop_requested() {
            if !self.replay_once(synth, &mut report)? {
                break;
            }

            report.repetitions += 1;
            debug!(repetitions = report.repetitions, "Repetition complete");

            if self.policy.is_due(report.repetitions) {
                let wait = self.policy.sample(rng);
                info!(
                    wait_secs = wait.as_secs_f64(),
                    "Waiting before next repetition"
                );
                pause.pause(wait);
                report.pauses.push(wait);
            }
        }

        info!(
            repetitions = report.repetitions,
            pauses = report.pauses.len(),
            "Playback stopped"
        );

        Ok(report)
    }

    /// One pass over the log. Returns false if a stop cut it short.
    fn replay_once<S>(&self, synth: &mut S, report: &mut PlaybackReport) -> CoreResult<bool>
    where
        S: PointerSynth + ?Sized,
    {
        for action in self.log.iter() {
            if self.stop_requested() {
                return Ok(false);
            }

            match *action {
                Action::Move { x, y } => synth.move_to(x, y)?,
                Action::Click { x, y, button } => match synth.click(x, y, button) {
                    Ok(()) => {}
                    Err(CoreError::UnsupportedButton { button, .. }) => {
                        if report.skipped_clicks == 0 {
                            let (x, y) = action.position();
                            warn!(%button, x, y, "Skipping clicks the platform cannot synthesize");
                        }
                        report.skipped_clicks += 1;
                    }
                    Err(e) => return Err(e),
                },
            }
        }

        Ok(true)
    }

    fn stop_requested(&self) -> bool {
        self.flags.is_stop_requested(SessionKind::Playback)
    }
}
