//! Mouse Automator Core Library
//!
//! Records pointer movements and clicks through an OS input hook and replays
//! them on demand with synthesized input, looping until told to stop.
//!
//! # Example
//!
//! ```no_run
//! use mouse_automator_core::{
//!     EnigoSynthFactory, InputHook, SessionController, SessionSettings,
//! };
//!
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> mouse_automator_core::CoreResult<()> {
//!     let (hook, _keys) = InputHook::spawn()?;
//!     let (controller, _events) = SessionController::new(
//!         hook,
//!         Arc::new(EnigoSynthFactory),
//!         SessionSettings::default(),
//!         tokio::runtime::Handle::current(),
//!     );
//!
//!     controller.start_recording();
//!     tokio::time::sleep(Duration::from_secs(10)).await;
//!     controller.stop_recording();
//!
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!     controller.start_playback();
//!     Ok(())
//! }
//! ```

mod action;
mod capture;
mod controller;
mod error;
mod session;
mod synth;

pub use {
    action::{Action, ActionLog, MouseButton},
    capture::{ActionBuffer, ActionSink, CaptureHandle, EventSource, InputHook, KeyPress},
    controller::{ControllerEvent, SessionController, StartOutcome},
    error::{CoreError, Result as CoreResult},
    session::{
        Pause, PausePolicy, PlaybackReport, PlaybackSession, SessionKind, SessionSettings,
        SessionState, Status, StopFlags, ThreadSleep,
    },
    synth::{EnigoSynth, EnigoSynthFactory, PointerSynth, SynthFactory},
};

#[cfg(test)]
mod tests;
