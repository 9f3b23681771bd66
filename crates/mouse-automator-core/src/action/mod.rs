#[allow(clippy::module_inception)]
mod action;
mod action_log;
mod mouse_button;

pub use {action::Action, action_log::ActionLog, mouse_button::MouseButton};
