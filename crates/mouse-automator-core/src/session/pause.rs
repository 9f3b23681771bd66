use std::time::Duration;

/// Blocks the playback thread between repetitions.
pub trait Pause {
    /// Wait for `duration`. Stop requests are not observed while waiting.
    fn pause(&mut self, duration: Duration);
}

/// [`Pause`] that sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
