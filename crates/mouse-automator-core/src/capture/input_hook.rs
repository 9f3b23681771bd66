use crate::{ActionSink, CaptureHandle, CoreError, CoreResult, EventSource, KeyPress};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicU64, Ordering},
    },
};

use error_location::ErrorLocation;
use rdev::{Event, EventType};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

struct Subscription {
    id: u64,
    sink: Arc<dyn ActionSink>,
}

type Slot = Arc<Mutex<Option<Subscription>>>;

/// Why the OS hook went down, if it did.
type FailureSlot = Arc<Mutex<Option<String>>>;

/// Process-wide OS input hook backed by `rdev`.
///
/// `rdev::listen` can only be installed once and never returns while it is
/// healthy, so the hook runs for the whole process on a dedicated thread.
/// Pointer events go to the current [`ActionSink`] subscriber, key presses
/// go to the channel returned by [`InputHook::spawn`].
pub struct InputHook {
    subscriber: Slot,
    failure: FailureSlot,
    next_id: AtomicU64,
}

impl InputHook {
    /// Install the hook on a background thread.
    ///
    /// Returns the hook and a receiver of every key press it observes.
    #[track_caller]
    #[instrument]
    pub fn spawn() -> CoreResult<(Arc<Self>, mpsc::UnboundedReceiver<KeyPress>)> {
        let hook = Arc::new(Self::detached());

        let slot = Arc::clone(&hook.subscriber);
        let failure = Arc::clone(&hook.failure);
        let (key_tx, key_rx) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name("input-hook".to_string())
            .spawn(move || listen(slot, failure, key_tx))
            .map_err(|e| CoreError::CaptureFailed {
                reason: format!("Failed to spawn input hook thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Input hook thread started");

        Ok((hook, key_rx))
    }

    /// Hook state without an OS listener attached.
    pub(crate) fn detached() -> Self {
        Self {
            subscriber: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Mark the hook as down. Later subscriptions fail with `reason`.
    #[cfg(test)]
    pub(crate) fn record_failure(&self, reason: impl Into<String>) {
        record_failure(&self.failure, reason.into());
    }

    /// Reason the OS hook stopped, if it has.
    pub fn failure(&self) -> Option<String> {
        self.failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl EventSource for InputHook {
    #[track_caller]
    fn begin(&self, sink: Arc<dyn ActionSink>) -> CoreResult<CaptureHandle> {
        if let Some(reason) = self.failure() {
            return Err(CoreError::CaptureFailed {
                reason: format!("Input hook is not running: {}", reason),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        if lock(&self.subscriber)
            .replace(Subscription { id, sink })
            .is_some()
        {
            warn!("Replaced an active capture subscription");
        }

        debug!(capture_id = id, "Capture subscription started");

        Ok(CaptureHandle(id))
    }

    fn end(&self, handle: CaptureHandle) {
        let mut slot = lock(&self.subscriber);

        if slot.as_ref().is_some_and(|s| s.id == handle.0) {
            *slot = None;
            debug!(capture_id = handle.0, "Capture subscription ended");
        }
    }
}

fn lock(slot: &Mutex<Option<Subscription>>) -> MutexGuard<'_, Option<Subscription>> {
    slot.lock().unwrap_or_else(|e| {
        error!("Capture subscriber lock poisoned, recovering: {}", e);
        e.into_inner()
    })
}

fn record_failure(failure: &Mutex<Option<String>>, reason: String) {
    *failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason);
}

fn current_sink(slot: &Mutex<Option<Subscription>>) -> Option<Arc<dyn ActionSink>> {
    lock(slot).as_ref().map(|s| Arc::clone(&s.sink))
}

/// Body of the hook thread. Only returns if the OS refuses the hook.
fn listen(slot: Slot, failure: FailureSlot, key_tx: mpsc::UnboundedSender<KeyPress>) {
    // rdev reports button presses without a position, so clicks are
    // stamped with the last move seen.
    let mut position = (0i32, 0i32);

    let callback = move |event: Event| match event.event_type {
        EventType::MouseMove { x, y } => {
            position = (x.round() as i32, y.round() as i32);
            if let Some(sink) = current_sink(&slot) {
                sink.on_move(position.0, position.1);
            }
        }
        EventType::ButtonPress(button) => {
            if let Some(sink) = current_sink(&slot) {
                sink.on_click(position.0, position.1, button.into());
            }
        }
        EventType::KeyPress(_) => {
            // Receiver gone means the app is shutting down.
            let _ = key_tx.send(KeyPress { name: event.name });
        }
        _ => {}
    };

    if let Err(e) = rdev::listen(callback) {
        error!(error = ?e, "Input hook stopped; recording and the stop key are unavailable");
        record_failure(&failure, format!("{:?}", e));
    }
}
