/// Tray icon states corresponding to application workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Nothing running.
    Idle,
    /// Counting down to a recording.
    Countdown,
    /// Capturing pointer input.
    Recording,
    /// Replaying a recording.
    Playback,
}
