use crate::{CoreResult, MouseButton};

use std::sync::Arc;

/// Receives pointer events from an [`EventSource`].
///
/// Called on the source's own thread. Implementations must not block.
pub trait ActionSink: Send + Sync {
    /// Pointer moved to an absolute position.
    fn on_move(&self, x: i32, y: i32);

    /// Button pressed at an absolute position. Releases are never delivered.
    fn on_click(&self, x: i32, y: i32, button: MouseButton);
}

/// Subscription token returned by [`EventSource::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureHandle(pub(crate) u64);

/// OS-level pointer event facility.
pub trait EventSource: Send + Sync {
    /// Start delivering pointer events to `sink`.
    ///
    /// A source has one subscriber at a time; a new subscription replaces
    /// the previous one.
    fn begin(&self, sink: Arc<dyn ActionSink>) -> CoreResult<CaptureHandle>;

    /// Stop delivering events for `handle`. Stale handles are ignored.
    fn end(&self, handle: CaptureHandle);
}
