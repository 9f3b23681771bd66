use crate::{
    Action, ActionBuffer, ActionSink, ControllerEvent, CoreError, EventSource, InputHook,
    KeyPress, MouseButton, PausePolicy, SessionController, SessionKind, SessionSettings,
    StartOutcome,
    tests::fakes::{FakeSource, UnusedSynthFactory, next_event},
};

use std::{sync::Arc, time::Duration};

/// WHAT: ActionBuffer records moves and clicks in arrival order
/// WHY: The buffer is the recording session's log
#[test]
fn given_events_when_sinking_into_buffer_then_log_in_order() {
    // Given: An empty buffer
    let buffer = ActionBuffer::default();
    assert!(buffer.is_empty());

    // When: Delivering a move and a right click
    buffer.on_move(5, 6);
    buffer.on_click(5, 6, MouseButton::Right);

    // Then: Taking the log yields both in order and empties the buffer
    let log = buffer.take_log();
    assert_eq!(
        &*log,
        &[
            Action::Move { x: 5, y: 6 },
            Action::Click {
                x: 5,
                y: 6,
                button: MouseButton::Right
            }
        ]
    );
    assert!(buffer.is_empty());
}

/// WHAT: Concurrent producers never lose actions
/// WHY: The hook thread and tests may append while another thread reads len
#[test]
#[allow(clippy::unwrap_used)]
fn given_concurrent_producers_when_sinking_then_no_action_lost() {
    // Given: A shared buffer
    let buffer = Arc::new(ActionBuffer::default());

    // When: Four threads append 250 moves each
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let buffer = Arc::clone(&buffer);
            std::thread::spawn(move || {
                for i in 0..250 {
                    buffer.on_move(t, i);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    // Then: All 1000 moves are present
    assert_eq!(buffer.len(), 1000);
}

/// WHAT: Ending a stale capture handle leaves the newer subscriber in place
/// WHY: A finished session must not cut off the one that replaced it
#[test]
fn given_replaced_subscription_when_ending_stale_handle_then_new_one_kept() {
    // Given: Two subscriptions, the second replacing the first
    let source = FakeSource::default();
    let first = Arc::new(ActionBuffer::default());
    let second = Arc::new(ActionBuffer::default());
    let stale = source.begin(first.clone()).ok();
    let current = source.begin(second.clone()).ok();

    // When: The first handle is ended
    if let Some(handle) = stale {
        source.end(handle);
    }
    source.emit_move(1, 1);

    // Then: Events still reach the second subscriber only
    assert!(current.is_some());
    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}

/// WHAT: KeyPress matches only its decoded name
/// WHY: Keys without a decodable character must never trigger the stop key
#[test]
fn given_key_presses_when_matching_then_only_exact_name_matches() {
    let q = KeyPress {
        name: Some("q".to_string()),
    };
    let shifted = KeyPress {
        name: Some("Q".to_string()),
    };
    let undecodable = KeyPress { name: None };

    assert!(q.matches("q"));
    assert!(!shifted.matches("q"));
    assert!(!undecodable.matches("q"));
}

/// WHAT: A hook whose OS listener died refuses new subscriptions
/// WHY: Recording against a dead hook would silently capture nothing
#[test]
fn given_failed_hook_when_beginning_capture_then_capture_failed() {
    // Given: A hook whose listener reported a failure
    let hook = InputHook::detached();
    hook.record_failure("no display");

    // When: A session subscribes
    let result = hook.begin(Arc::new(ActionBuffer::default()));

    // Then: The subscription fails with the recorded reason
    assert_eq!(hook.failure().as_deref(), Some("no display"));
    assert!(matches!(result, Err(CoreError::CaptureFailed { .. })));
}

/// WHAT: A healthy hook hands out handles and ignores stale ones
/// WHY: The production hook follows the same subscription rules as any source
#[test]
fn given_healthy_hook_when_ending_stale_handle_then_current_kept() {
    // Given: A hook with two subscriptions, the second replacing the first
    let hook = InputHook::detached();
    let stale = hook.begin(Arc::new(ActionBuffer::default()));
    let current = hook.begin(Arc::new(ActionBuffer::default()));

    // When: The stale handle is ended
    if let Ok(handle) = stale {
        hook.end(handle);
    }

    // Then: Both subscriptions were granted and no failure is recorded
    assert!(current.is_ok());
    assert!(hook.failure().is_none());
}

/// WHAT: Recording against a failed hook reports SessionFailed
/// WHY: The user must see the hook error, not a "no movements" warning
#[tokio::test]
async fn given_failed_hook_when_recording_then_session_failed_emitted() {
    // Given: A controller whose input hook has gone down
    let hook = Arc::new(InputHook::detached());
    hook.record_failure("accessibility permission denied");
    let settings = SessionSettings {
        countdown_secs: 0,
        poll_interval: Duration::from_millis(1),
        pause: PausePolicy::default(),
    };
    let (controller, mut events_rx) = SessionController::new(
        hook,
        Arc::new(UnusedSynthFactory),
        settings,
        tokio::runtime::Handle::current(),
    );

    // When: A recording is started
    assert_eq!(controller.start_recording(), StartOutcome::Started);

    // Then: The recording fails instead of completing empty
    let event = next_event(&mut events_rx, |e| {
        matches!(
            e,
            ControllerEvent::SessionFailed { .. } | ControllerEvent::RecordingComplete { .. }
        )
    })
    .await;
    assert!(matches!(
        event,
        Some(ControllerEvent::SessionFailed {
            kind: SessionKind::Recording,
            ..
        })
    ));
}
