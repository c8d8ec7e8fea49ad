//! Cooperative run control: wall-clock budget and interrupt polling.
//!
//! The engine is single-threaded; the only asynchronous event is an external
//! interrupt (a POSIX signal in the CLI). The handler side merely raises an
//! atomic flag, and every loop that already polls the wall clock polls the
//! flag at the same points, so termination is always observed at a state
//! boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable handle to the run-wide stop flag.
///
/// Raising the flag is idempotent and never cleared for the lifetime of a
/// run; the signal handler stores into the shared atomic and nothing else.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// Creates a new, unraised flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Returns whether the flag has been raised.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

/// Wall-clock budget for a run, combined with the interrupt flag.
#[derive(Debug, Clone)]
pub struct RunClock {
    started: Instant,
    budget: Duration,
    interrupt: InterruptFlag,
}

impl RunClock {
    /// Starts a clock with the given total budget and interrupt flag.
    pub fn start(budget: Duration, interrupt: InterruptFlag) -> Self {
        Self {
            started: Instant::now(),
            budget,
            interrupt,
        }
    }

    /// Returns the time elapsed since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns the configured total budget.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Returns whether the run should stop: budget exhausted or interrupted.
    pub fn expired(&self) -> bool {
        self.interrupt.is_raised() || self.elapsed() >= self.budget
    }

    /// Returns whether the external interrupt has been raised.
    pub fn interrupted(&self) -> bool {
        self.interrupt.is_raised()
    }
}
