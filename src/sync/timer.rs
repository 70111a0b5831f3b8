//! Cancellable deadline timers
//!
//! Timers never run code on their own. The owner polls them from its
//! event loop with the current instant, so cancelling a timer or dropping
//! its owner guarantees it will never fire.

use std::time::{Duration, Instant};

/// Quiet period before a search term is sent to the backend
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// A one-shot deadline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    due: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to fire `delay` after `now`, replacing any pending deadline
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Disarms the timer
    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Time left until the deadline, if armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Holds back a value until no new value arrived for the quiet period
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    timer: Timer,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            timer: Timer::new(),
            pending: None,
        }
    }

    /// Replaces the pending value and restarts the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.timer.schedule(now, self.quiet);
    }

    /// Releases the pending value once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.timer.fire(now) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drops the pending value without releasing it
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}
