use crate::MouseButton;

/// One recorded pointer event.
///
/// Coordinates are absolute screen coordinates at capture time and are
/// replayed unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pointer moved to an absolute position.
    Move {
        /// Horizontal screen coordinate.
        x: i32,
        /// Vertical screen coordinate.
        y: i32,
    },
    /// A button was pressed at an absolute position.
    Click {
        /// Horizontal screen coordinate.
        x: i32,
        /// Vertical screen coordinate.
        y: i32,
        /// Button that was pressed.
        button: MouseButton,
    },
}

impl Action {
    /// Screen position the action targets.
    pub fn position(&self) -> (i32, i32) {
        match *self {
            Action::Move { x, y } | Action::Click { x, y, .. } => (x, y),
        }
    }
}
