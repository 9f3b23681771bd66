use crate::{Action, ActionLog, ActionSink, MouseButton};

use std::sync::Mutex;

use tracing::error;

/// Lock-guarded, append-only action log fed by an [`EventSource`](crate::EventSource).
#[derive(Debug, Default)]
pub struct ActionBuffer {
    actions: Mutex<Vec<Action>>,
}

impl ActionBuffer {
    /// Number of actions captured so far.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been captured.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the captured actions into an [`ActionLog`], leaving the buffer empty.
    pub fn take_log(&self) -> ActionLog {
        ActionLog::from(std::mem::take(&mut *self.lock()))
    }

    fn push(&self, action: Action) {
        self.lock().push(action);
    }

    // A poisoned lock still guards a valid Vec; keep recording.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Action>> {
        self.actions.lock().unwrap_or_else(|e| {
            error!("Action buffer lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

impl ActionSink for ActionBuffer {
    fn on_move(&self, x: i32, y: i32) {
        self.push(Action::Move { x, y });
    }

    fn on_click(&self, x: i32, y: i32, button: MouseButton) {
        self.push(Action::Click { x, y, button });
    }
}
