use crate::{PausePolicy, SessionSettings};

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};

/// WHAT: Pauses fall due on every second repetition by default
/// WHY: Matches the replay cadence users expect between passes
#[test]
fn given_default_policy_when_checking_due_then_every_second_repetition() {
    let policy = PausePolicy::default();

    let due: Vec<u64> = (0..=6).filter(|r| policy.is_due(*r)).collect();

    assert_eq!(due, vec![2, 4, 6]);
}

/// WHAT: A zero interval disables pauses
/// WHY: Avoids division by zero and lets config turn pauses off
#[test]
fn given_zero_interval_when_checking_due_then_never_due() {
    let policy = PausePolicy {
        every: 0,
        ..PausePolicy::default()
    };

    assert!((0..10).all(|r| !policy.is_due(r)));
}

/// WHAT: Sampled pauses stay within the configured bounds
/// WHY: Pause lengths are drawn uniformly from [min, max]
#[test]
fn given_policy_when_sampling_many_then_all_within_bounds() {
    let policy = PausePolicy::default();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..1000 {
        let wait = policy.sample(&mut rng);
        assert!(wait >= Duration::from_secs(3) && wait <= Duration::from_secs(7));
    }
}

/// WHAT: Equal bounds yield a fixed pause
/// WHY: A degenerate range must not panic inside the RNG
#[test]
fn given_equal_bounds_when_sampling_then_fixed_duration() {
    let policy = PausePolicy {
        every: 1,
        min: Duration::from_millis(0),
        max: Duration::from_millis(0),
    };

    assert_eq!(
        policy.sample(&mut StdRng::seed_from_u64(0)),
        Duration::ZERO
    );
}

/// WHAT: Default settings use a 3 second countdown and 10ms polling
/// WHY: Keeps stop latency low without busy-waiting
#[test]
fn given_defaults_when_creating_settings_then_expected_values() {
    let settings = SessionSettings::default();

    assert_eq!(settings.countdown_secs, 3);
    assert_eq!(settings.poll_interval, Duration::from_millis(10));
    assert_eq!(settings.pause, PausePolicy::default());
}
