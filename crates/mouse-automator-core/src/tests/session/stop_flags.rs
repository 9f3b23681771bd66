use crate::{SessionKind, StopFlags};

/// WHAT: Stop flags for the two kinds are independent
/// WHY: Stopping playback must not end a recording and vice versa
#[test]
fn given_flags_when_stopping_one_kind_then_other_untouched() {
    let flags = StopFlags::default();

    flags.request_stop(SessionKind::Playback);

    assert!(flags.is_stop_requested(SessionKind::Playback));
    assert!(!flags.is_stop_requested(SessionKind::Recording));
}

/// WHAT: Repeated stop requests are harmless and reset clears them
/// WHY: Stop is idempotent; the next session starts with a clear flag
#[test]
fn given_repeated_stops_when_resetting_then_flag_cleared() {
    let flags = StopFlags::default();

    flags.request_stop_all();
    flags.request_stop_all();
    flags.reset(SessionKind::Recording);

    assert!(!flags.is_stop_requested(SessionKind::Recording));
    assert!(flags.is_stop_requested(SessionKind::Playback));
}
