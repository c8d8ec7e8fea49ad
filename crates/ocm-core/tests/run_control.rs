use std::time::Duration;

use ocm_core::{InterruptFlag, RunClock};

#[test]
fn fresh_clock_is_not_expired() {
    let clock = RunClock::start(Duration::from_secs(3600), InterruptFlag::new());
    assert!(!clock.expired());
    assert!(!clock.interrupted());
}

#[test]
fn zero_budget_expires_immediately() {
    let clock = RunClock::start(Duration::ZERO, InterruptFlag::new());
    assert!(clock.expired());
    assert!(!clock.interrupted());
}

#[test]
fn raised_flag_expires_clock_regardless_of_budget() {
    let flag = InterruptFlag::new();
    let clock = RunClock::start(Duration::from_secs(3600), flag.clone());
    assert!(!clock.expired());

    flag.raise();
    assert!(clock.interrupted());
    assert!(clock.expired());

    // Raising twice is harmless.
    flag.raise();
    assert!(clock.interrupted());
}
