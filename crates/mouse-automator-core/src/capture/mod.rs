mod action_buffer;
mod event_source;
mod input_hook;
mod key_press;

pub use {
    action_buffer::ActionBuffer,
    event_source::{ActionSink, CaptureHandle, EventSource},
    input_hook::InputHook,
    key_press::KeyPress,
};
