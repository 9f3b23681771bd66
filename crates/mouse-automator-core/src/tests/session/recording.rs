use crate::{
    Action, ControllerEvent, CoreError, MouseButton, SessionKind, SessionSettings, Status,
    StopFlags,
    session::RecordingSession,
    tests::fakes::{FailingSource, FakeSource},
};

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;

fn immediate_settings() -> SessionSettings {
    SessionSettings {
        countdown_secs: 0,
        poll_interval: Duration::from_millis(1),
        ..SessionSettings::default()
    }
}

/// WHAT: Captured events come back as an ordered log after stop
/// WHY: The recording session's whole job is producing the action log
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[allow(clippy::unwrap_used)]
async fn given_captured_events_when_stopped_then_log_in_capture_order() {
    // Given: A running session over a fake source
    let source = Arc::new(FakeSource::default());
    let flags = Arc::new(StopFlags::default());
    let (events, _events_rx) = mpsc::unbounded_channel();
    let session = RecordingSession::new(
        source.clone(),
        Arc::clone(&flags),
        &immediate_settings(),
        events,
    );
    let task = tokio::spawn(session.run());
    assert!(source.wait_subscribed().await);

    // When: Events arrive, then stop is requested
    source.emit_move(10, 10);
    source.emit_click(10, 10, MouseButton::Left);
    source.emit_move(50, 50);
    flags.request_stop(SessionKind::Recording);
    let log = task.await.unwrap().unwrap();

    // Then: The log holds the events in order and the capture was released
    assert_eq!(
        &*log,
        &[
            Action::Move { x: 10, y: 10 },
            Action::Click {
                x: 10,
                y: 10,
                button: MouseButton::Left
            },
            Action::Move { x: 50, y: 50 },
        ]
    );
    assert_eq!(source.ends(), 1);
    assert!(!source.is_subscribed());
}

/// WHAT: Stopping before any event yields an empty log
/// WHY: Empty recordings are valid and later refused for playback
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[allow(clippy::unwrap_used)]
async fn given_no_events_when_stopped_then_empty_log() {
    // Given: A running session
    let source = Arc::new(FakeSource::default());
    let flags = Arc::new(StopFlags::default());
    let (events, _events_rx) = mpsc::unbounded_channel();
    let session = RecordingSession::new(
        source.clone(),
        Arc::clone(&flags),
        &immediate_settings(),
        events,
    );
    let task = tokio::spawn(session.run());
    assert!(source.wait_subscribed().await);

    // When: Stopped immediately
    flags.request_stop(SessionKind::Recording);
    let log = task.await.unwrap().unwrap();

    // Then: Nothing was captured
    assert!(log.is_empty());
}

/// WHAT: The countdown emits one status per second remaining
/// WHY: The front-end shows "Starting in N..." before capture begins
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[allow(clippy::unwrap_used)]
async fn given_countdown_when_stopped_during_it_then_no_capture_and_empty_log() {
    // Given: A session with a three second countdown
    let source = Arc::new(FakeSource::default());
    let flags = Arc::new(StopFlags::default());
    let (events, mut events_rx) = mpsc::unbounded_channel();
    let settings = SessionSettings {
        countdown_secs: 3,
        ..immediate_settings()
    };
    let session = RecordingSession::new(source.clone(), Arc::clone(&flags), &settings, events);
    let task = tokio::spawn(session.run());

    // When: The first countdown status arrives and stop is requested
    let first = events_rx.recv().await.unwrap();
    flags.request_stop(SessionKind::Recording);
    let log = tokio::time::timeout(Duration::from_millis(500), task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    // Then: Countdown started at 3, capture never began, log is empty
    assert_eq!(
        first,
        ControllerEvent::StatusChanged {
            kind: SessionKind::Recording,
            status: Status::StartingIn(3),
        }
    );
    assert_eq!(source.begins(), 0);
    assert!(log.is_empty());
}

/// WHAT: A hook failure is returned as CaptureFailed
/// WHY: OS hook failures propagate instead of recording nothing silently
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_source_when_running_then_capture_failed() {
    let flags = Arc::new(StopFlags::default());
    let (events, _events_rx) = mpsc::unbounded_channel();
    let session =
        RecordingSession::new(Arc::new(FailingSource), flags, &immediate_settings(), events);

    let result = session.run().await;

    assert!(matches!(result, Err(CoreError::CaptureFailed { .. })));
}

/// WHAT: Creating a session clears a stale stop request
/// WHY: A stop from the previous recording must not end the new one at once
#[test]
fn given_stale_stop_when_creating_session_then_flag_cleared() {
    let flags = Arc::new(StopFlags::default());
    flags.request_stop(SessionKind::Recording);
    let (events, _events_rx) = mpsc::unbounded_channel();

    let _session = RecordingSession::new(
        Arc::new(FakeSource::default()),
        Arc::clone(&flags),
        &immediate_settings(),
        events,
    );

    assert!(!flags.is_stop_requested(SessionKind::Recording));
}
