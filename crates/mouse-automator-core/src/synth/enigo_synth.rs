use crate::{CoreError, CoreResult, MouseButton, PointerSynth, SynthFactory};

use std::panic::Location;

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use error_location::ErrorLocation;
use tracing::instrument;

/// [`PointerSynth`] backed by `enigo`.
pub struct EnigoSynth {
    enigo: Enigo,
}

impl EnigoSynth {
    /// Connect to the platform's input synthesis facility.
    #[track_caller]
    #[instrument]
    pub fn new() -> CoreResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| CoreError::SynthesisFailed {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { enigo })
    }
}

/// Map a recorded button onto one enigo can press.
///
/// Extra buttons use the raw codes X11 (8/9) and Windows (1/2) report for
/// back/forward. macOS has no synthesizable extra buttons.
#[track_caller]
pub(crate) fn enigo_button(button: MouseButton) -> CoreResult<Button> {
    match button {
        MouseButton::Left => Ok(Button::Left),
        MouseButton::Right => Ok(Button::Right),
        MouseButton::Middle => Ok(Button::Middle),
        #[cfg(not(target_os = "macos"))]
        MouseButton::Other(1 | 8) => Ok(Button::Back),
        #[cfg(not(target_os = "macos"))]
        MouseButton::Other(2 | 9) => Ok(Button::Forward),
        MouseButton::Other(_) => Err(CoreError::UnsupportedButton {
            button,
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

impl PointerSynth for EnigoSynth {
    #[track_caller]
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| CoreError::SynthesisFailed {
                reason: format!("Failed to move pointer to ({}, {}): {}", x, y, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    #[track_caller]
    fn click(&mut self, x: i32, y: i32, button: MouseButton) -> CoreResult<()> {
        let target = enigo_button(button)?;

        self.move_to(x, y)?;

        self.enigo
            .button(target, Direction::Click)
            .map_err(|e| CoreError::SynthesisFailed {
                reason: format!("Failed to click {} at ({}, {}): {}", button, x, y, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Creates an [`EnigoSynth`] per playback session.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnigoSynthFactory;

impl SynthFactory for EnigoSynthFactory {
    fn create(&self) -> CoreResult<Box<dyn PointerSynth>> {
        Ok(Box::new(EnigoSynth::new()?))
    }
}
