use crate::{
    Action, ActionLog, CoreError, MouseButton, PausePolicy, PlaybackSession, SessionKind,
    StopFlags,
    tests::fakes::{RecordedPause, RecordingSynth, Synthesized},
};

use std::{sync::Arc, time::Duration};

use rand::{SeedableRng, rngs::StdRng};

fn three_action_log() -> ActionLog {
    ActionLog::from(vec![
        Action::Move { x: 10, y: 10 },
        Action::Click {
            x: 10,
            y: 10,
            button: MouseButton::Left,
        },
        Action::Move { x: 50, y: 50 },
    ])
}

/// WHAT: One stopped repetition replays exactly the recorded calls
/// WHY: Replay must reproduce order, coordinates and buttons verbatim
#[test]
#[allow(clippy::unwrap_used)]
fn given_three_actions_when_stopped_after_first_pass_then_exact_calls_in_order() {
    // Given: A three-action log and a synth that stops after three calls
    let flags = Arc::new(StopFlags::default());
    let session = PlaybackSession::new(
        three_action_log(),
        Arc::clone(&flags),
        PausePolicy::default(),
    );
    let mut synth = RecordingSynth::stopping_after(3, Arc::clone(&flags));
    let mut pause = RecordedPause::default();

    // When: Running playback
    let report = session
        .run(&mut synth, &mut pause, &mut StdRng::seed_from_u64(7))
        .unwrap();

    // Then: Exactly the recorded calls, one repetition, no pause
    assert_eq!(
        synth.calls(),
        vec![
            Synthesized::Move(10, 10),
            Synthesized::Click(10, 10, MouseButton::Left),
            Synthesized::Move(50, 50),
        ]
    );
    assert_eq!(report.repetitions, 1);
    assert!(pause.pauses.is_empty());
}

/// WHAT: Stopping after the 4th repetition yields two pauses within [3, 7]s
/// WHY: Every second completed repetition is followed by a random pause
#[test]
#[allow(clippy::unwrap_used)]
fn given_stop_after_fourth_repetition_when_replaying_then_two_pauses_in_range() {
    // Given: A synth that requests stop on the last call of repetition 4
    let flags = Arc::new(StopFlags::default());
    let log = three_action_log();
    let session = PlaybackSession::new(log.clone(), Arc::clone(&flags), PausePolicy::default());
    let mut synth = RecordingSynth::stopping_after(log.len() * 4, Arc::clone(&flags));
    let mut pause = RecordedPause::default();

    // When: Running playback
    let report = session
        .run(&mut synth, &mut pause, &mut StdRng::seed_from_u64(42))
        .unwrap();

    // Then: Four repetitions and pauses after repetitions 2 and 4
    assert_eq!(report.repetitions, 4);
    assert_eq!(pause.pauses.len(), 2);
    assert_eq!(report.pauses, pause.pauses);
    for wait in &pause.pauses {
        assert!(*wait >= Duration::from_secs(3), "pause too short: {:?}", wait);
        assert!(*wait <= Duration::from_secs(7), "pause too long: {:?}", wait);
    }
    assert_eq!(synth.calls().len(), log.len() * 4);
}

/// WHAT: A stop mid-repetition aborts before the next action
/// WHY: Cancellation is honoured at every action, not only between passes
#[test]
#[allow(clippy::unwrap_used)]
fn given_stop_mid_repetition_when_replaying_then_partial_pass_not_counted() {
    // Given: A synth that requests stop after the first call
    let flags = Arc::new(StopFlags::default());
    let session = PlaybackSession::new(
        three_action_log(),
        Arc::clone(&flags),
        PausePolicy::default(),
    );
    let mut synth = RecordingSynth::stopping_after(1, Arc::clone(&flags));
    let mut pause = RecordedPause::default();

    // When: Running playback
    let report = session
        .run(&mut synth, &mut pause, &mut StdRng::seed_from_u64(1))
        .unwrap();

    // Then: Only the first action was issued and no repetition completed
    assert_eq!(synth.calls(), vec![Synthesized::Move(10, 10)]);
    assert_eq!(report.repetitions, 0);
}

/// WHAT: Creating a session clears a stale stop request
/// WHY: A stop from a previous session must not cancel the next one
#[test]
#[allow(clippy::unwrap_used)]
fn given_stale_stop_flag_when_creating_session_then_flag_cleared() {
    // Given: A flag left set by an earlier stop
    let flags = Arc::new(StopFlags::default());
    flags.request_stop(SessionKind::Playback);

    // When: A new session is prepared
    let session = PlaybackSession::new(
        three_action_log(),
        Arc::clone(&flags),
        PausePolicy::default(),
    );

    // Then: The flag is clear and playback runs a full pass
    assert!(!flags.is_stop_requested(SessionKind::Playback));
    let mut synth = RecordingSynth::stopping_after(3, Arc::clone(&flags));
    let report = session
        .run(
            &mut synth,
            &mut RecordedPause::default(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();
    assert_eq!(report.repetitions, 1);
}

/// WHAT: Clicks with an unsupported button are skipped, not fatal
/// WHY: One exotic button should not end an otherwise valid replay
#[test]
#[allow(clippy::unwrap_used)]
fn given_unsupported_button_when_replaying_then_click_skipped() {
    // Given: A log with an extra-button click the synth cannot press
    let flags = Arc::new(StopFlags::default());
    let log = ActionLog::from(vec![
        Action::Click {
            x: 1,
            y: 1,
            button: MouseButton::Other(42),
        },
        Action::Move { x: 2, y: 2 },
    ]);
    let session = PlaybackSession::new(log, Arc::clone(&flags), PausePolicy::default());
    let mut synth = RecordingSynth::stopping_after(1, Arc::clone(&flags));
    synth.unsupported = Some(MouseButton::Other(42));

    // When: Running playback
    let report = session
        .run(
            &mut synth,
            &mut RecordedPause::default(),
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();

    // Then: The move still happened and the click was counted as skipped
    assert_eq!(synth.calls(), vec![Synthesized::Move(2, 2)]);
    assert_eq!(report.skipped_clicks, 1);
}

/// WHAT: Synthesis failures abort playback with an error
/// WHY: A broken display connection must surface instead of spinning forever
#[test]
fn given_failing_synth_when_replaying_then_synthesis_error_returned() {
    // Given: A synth that fails after two calls
    let flags = Arc::new(StopFlags::default());
    let session = PlaybackSession::new(
        three_action_log(),
        Arc::clone(&flags),
        PausePolicy::default(),
    );
    let mut synth = RecordingSynth::new();
    synth.fail_after = Some(2);

    // When: Running playback
    let result = session.run(
        &mut synth,
        &mut RecordedPause::default(),
        &mut StdRng::seed_from_u64(9),
    );

    // Then: The synthesis error is returned
    assert!(matches!(result, Err(CoreError::SynthesisFailed { .. })));
    assert_eq!(synth.calls().len(), 2);
}

/// WHAT: An empty log returns immediately
/// WHY: Looping over nothing would spin and pause forever
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_log_when_replaying_then_returns_without_repetitions() {
    let flags = Arc::new(StopFlags::default());
    let session = PlaybackSession::new(ActionLog::default(), flags, PausePolicy::default());
    let mut synth = RecordingSynth::new();

    let report = session
        .run(
            &mut synth,
            &mut RecordedPause::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

    assert_eq!(report.repetitions, 0);
    assert!(synth.calls().is_empty());
}
