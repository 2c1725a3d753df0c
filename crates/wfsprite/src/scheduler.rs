//! Debounced regeneration requests
//!
//! Settings change in bursts (a slider drag, a config file saved twice). A
//! request only becomes due after a quiet period with no newer request; each
//! newer request restarts the timer and replaces the pending value. Time is
//! passed in by the caller, so the schedule is deterministic under test.

use std::time::{Duration, Instant};

/// Quiet period before a pending request runs
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(100);

/// Holds at most one pending value until its quiet period elapses
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `value`, replacing any pending one; true when one was replaced
    pub fn request(&mut self, value: T, now: Instant) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some((value, now + self.quiet));
        replaced
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its quiet period has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop the pending value without running it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
