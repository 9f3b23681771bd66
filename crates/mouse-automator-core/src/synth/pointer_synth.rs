use crate::{CoreResult, MouseButton};

/// Issues synthesized pointer input in absolute screen coordinates.
pub trait PointerSynth {
    /// Move the pointer to `(x, y)`.
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()>;

    /// Click `button` at `(x, y)`.
    fn click(&mut self, x: i32, y: i32, button: MouseButton) -> CoreResult<()>;
}

/// Builds a [`PointerSynth`] on the thread that will use it.
///
/// Synthesizers are not required to be `Send`, so playback sessions create
/// theirs inside the blocking task.
pub trait SynthFactory: Send + Sync {
    /// Create a synthesizer for one playback session.
    fn create(&self) -> CoreResult<Box<dyn PointerSynth>>;
}
