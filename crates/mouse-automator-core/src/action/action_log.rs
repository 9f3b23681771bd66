use crate::Action;

use std::{ops::Deref, sync::Arc};

/// Ordered, immutable recording produced by one recording session.
///
/// Backed by a shared slice so the controller can hand snapshots to
/// playback sessions without copying. Once built, a log never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    actions: Arc<[Action]>,
}

impl ActionLog {
    /// Number of recorded moves.
    pub fn move_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Move { .. }))
            .count()
    }

    /// Number of recorded clicks.
    pub fn click_count(&self) -> usize {
        self.actions.len() - self.move_count()
    }
}

impl Deref for ActionLog {
    type Target = [Action];

    fn deref(&self) -> &Self::Target {
        &self.actions
    }
}

impl From<Vec<Action>> for ActionLog {
    fn from(actions: Vec<Action>) -> Self {
        Self {
            actions: actions.into(),
        }
    }
}

impl FromIterator<Action> for ActionLog {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}
