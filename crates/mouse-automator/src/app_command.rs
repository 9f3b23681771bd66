/// Commands sent from the tray menu and stop key to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a recording session (after its countdown).
    StartRecording,
    /// Replay the latest recording until stopped.
    StartPlayback,
    /// Stop the recording if one is active, otherwise the playback.
    StopCurrent,
    /// Stop every session. Sent by the global stop key.
    StopAll,
    /// Open the configuration file in the system editor.
    OpenSettings,
    /// Request application shutdown.
    Shutdown,
}
