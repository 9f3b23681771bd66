use std::time::Duration;

use rand::Rng;

/// Default seconds of countdown before recording starts.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 3;

/// Default interval at which a recording polls its stop flag.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Timing knobs shared by every session a controller spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Seconds of countdown before capture begins. Zero starts immediately.
    pub countdown_secs: u32,
    /// How often a recording checks its stop flag.
    pub poll_interval: Duration,
    /// Pauses inserted between playback repetitions.
    pub pause: PausePolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            pause: PausePolicy::default(),
        }
    }
}

/// Randomized pause after every `every`-th completed repetition.
#[derive(Debug, Clone, PartialEq)]
pub struct PausePolicy {
    /// Pause after repetitions that are a multiple of this. Zero disables pauses.
    pub every: u64,
    /// Shortest pause.
    pub min: Duration,
    /// Longest pause.
    pub max: Duration,
}

impl Default for PausePolicy {
    fn default() -> Self {
        Self {
            every: 2,
            min: Duration::from_secs(3),
            max: Duration::from_secs(7),
        }
    }
}

impl PausePolicy {
    /// Whether a pause follows the given number of completed repetitions.
    pub fn is_due(&self, repetitions: u64) -> bool {
        self.every != 0 && repetitions != 0 && repetitions % self.every == 0
    }

    /// Draw a pause length uniformly from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        Duration::from_secs_f64(rng.gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64()))
    }
}
