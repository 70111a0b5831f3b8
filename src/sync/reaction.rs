//! Reaction-time measurement
//!
//! Five rounds of "wait for the signal, then press". The state machine
//! takes the current instant as input so it can be driven by a real event
//! loop or by tests:
//!
//! ```text
//! Idle -> Waiting (1-3s) -> Armed -> (sample recorded) -> Waiting | Finished
//! ```
//!
//! After the fifth sample the rounded mean is submitted to the backend.
//! The average is kept either way; `persisted` tells whether it was saved.

use std::time::{Duration, Instant};

use rand::Rng;

use super::timer::Timer;
use crate::api::{ApiError, Backend};

/// Samples per test
pub const ROUNDS: usize = 5;

/// Shortest wait before the signal
pub const MIN_DELAY: Duration = Duration::from_millis(1000);

/// Longest wait before the signal
pub const MAX_DELAY: Duration = Duration::from_millis(3000);

/// Draws a random wait between [`MIN_DELAY`] and [`MAX_DELAY`]
pub fn random_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    let ms = rng.gen_range(MIN_DELAY.as_millis() as u64..=MAX_DELAY.as_millis() as u64);
    Duration::from_millis(ms)
}

/// Arithmetic mean rounded half-up to whole milliseconds
pub fn average_ms(samples: &[u32]) -> Option<u32> {
    if samples.is_empty() {
        return None;
    }
    let sum: u64 = samples.iter().map(|&s| u64::from(s)).sum();
    let n = samples.len() as u64;
    Some(((sum * 2 + n) / (n * 2)) as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Signal pending; a press now is ignored
    Waiting,
    /// Signal visible since the given instant
    Armed { since: Instant },
    Finished { average_ms: u32, persisted: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Not armed; nothing recorded
    Ignored,
    Recorded { latency_ms: u32, round: usize },
    Finished { average_ms: u32 },
}

#[derive(Debug, Clone)]
pub struct ReactionTest {
    phase: Phase,
    samples: Vec<u32>,
    timer: Timer,
}

impl Default for ReactionTest {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ReactionTest {
    fn drop(&mut self) {
        if self.timer.is_pending() {
            tracing::debug!("reaction test dropped with a pending signal");
        }
        self.timer.cancel();
    }
}

impl ReactionTest {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            samples: Vec::with_capacity(ROUNDS),
            timer: Timer::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// True between start and the fifth sample
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Waiting | Phase::Armed { .. })
    }

    /// True while a signal is scheduled but not shown yet
    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_pending()
    }

    /// Time until the pending signal is due, while one is scheduled
    pub fn time_to_signal(&self, now: Instant) -> Option<Duration> {
        if !self.has_pending_timer() {
            return None;
        }
        self.timer.remaining(now)
    }

    /// Starts a new test, discarding previous samples
    pub fn start(&mut self, now: Instant, delay: Duration) {
        self.samples.clear();
        self.wait(now, delay);
    }

    fn wait(&mut self, now: Instant, delay: Duration) {
        self.phase = Phase::Waiting;
        self.timer.schedule(now, delay);
    }

    /// Shows the signal once its delay has passed. Returns true when it appears.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Waiting && self.timer.fire(now) {
            self.phase = Phase::Armed { since: now };
            return true;
        }
        false
    }

    /// Handles a press. `next_delay` is used when another round follows.
    pub fn press(&mut self, now: Instant, next_delay: Duration) -> Press {
        let since = match self.phase {
            Phase::Armed { since } => since,
            _ => return Press::Ignored,
        };

        let latency_ms = now.saturating_duration_since(since).as_millis().min(u32::MAX as u128) as u32;
        self.samples.push(latency_ms);

        if self.samples.len() >= ROUNDS {
            let average_ms = average_ms(&self.samples).unwrap_or(latency_ms);
            self.phase = Phase::Finished {
                average_ms,
                persisted: false,
            };
            return Press::Finished { average_ms };
        }

        self.wait(now, next_delay);
        Press::Recorded {
            latency_ms,
            round: self.samples.len(),
        }
    }

    /// Sends the finished average to the backend.
    ///
    /// On failure the average stays available, marked as not persisted.
    pub fn submit(&mut self, backend: &dyn Backend) -> Result<u32, ApiError> {
        let average_ms = match self.phase {
            Phase::Finished { average_ms, .. } => average_ms,
            _ => return Err(ApiError::Rejected("reaction test is not finished".to_string())),
        };

        let result = backend.update_reaction_time(average_ms);
        if let Err(e) = &result {
            tracing::warn!(average_ms, error = %e, "failed to save reaction time");
        }
        self.phase = Phase::Finished {
            average_ms,
            persisted: result.is_ok(),
        };
        result.map(|_| average_ms)
    }

    /// Stops the test and disarms any pending signal
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.samples.clear();
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::testing::FakeBackend;

    const DELAY: Duration = Duration::from_millis(1500);

    fn run(test: &mut ReactionTest, latencies: &[u64]) -> (Instant, Vec<Press>) {
        let mut now = Instant::now();
        test.start(now, DELAY);
        let mut presses = Vec::new();

        for &latency in latencies {
            now += DELAY;
            assert!(test.tick(now));
            now += Duration::from_millis(latency);
            presses.push(test.press(now, DELAY));
        }
        (now, presses)
    }

    #[test]
    fn average_of_known_samples() {
        assert_eq!(average_ms(&[120, 95, 140, 110, 105]), Some(114));
        assert_eq!(average_ms(&[100, 101]), Some(101));
        assert_eq!(average_ms(&[]), None);
    }

    #[test]
    fn five_rounds_finish_with_average() {
        let mut test = ReactionTest::new();
        let (_, presses) = run(&mut test, &[120, 95, 140, 110, 105]);

        assert_eq!(presses[0], Press::Recorded { latency_ms: 120, round: 1 });
        assert_eq!(presses[4], Press::Finished { average_ms: 114 });
        assert_eq!(test.phase(), Phase::Finished { average_ms: 114, persisted: false });
        assert!(!test.is_running());
    }

    #[test]
    fn press_before_signal_is_ignored() {
        let mut test = ReactionTest::new();
        let now = Instant::now();
        test.start(now, DELAY);

        assert_eq!(test.press(now + Duration::from_millis(500), DELAY), Press::Ignored);
        assert!(!test.tick(now + Duration::from_millis(1499)));
        assert!(test.samples().is_empty());
        assert_eq!(test.phase(), Phase::Waiting);
    }

    #[test]
    fn idle_press_is_ignored() {
        let mut test = ReactionTest::new();
        assert_eq!(test.press(Instant::now(), DELAY), Press::Ignored);
    }

    #[test]
    fn submit_success_marks_persisted() {
        let backend = FakeBackend::new();
        let mut test = ReactionTest::new();
        run(&mut test, &[120, 95, 140, 110, 105]);

        assert_eq!(test.submit(&backend), Ok(114));
        assert_eq!(test.phase(), Phase::Finished { average_ms: 114, persisted: true });
        assert_eq!(*backend.reaction_times.borrow(), vec![114]);
    }

    #[test]
    fn submit_failure_keeps_average() {
        let backend = FakeBackend::new();
        backend.fail_writes.set(true);
        let mut test = ReactionTest::new();
        run(&mut test, &[200, 200, 200, 200, 200]);

        assert!(test.submit(&backend).is_err());
        assert_eq!(test.phase(), Phase::Finished { average_ms: 200, persisted: false });
    }

    #[test]
    fn submit_before_finish_makes_no_call() {
        let backend = FakeBackend::new();
        let mut test = ReactionTest::new();
        test.start(Instant::now(), DELAY);

        assert!(test.submit(&backend).is_err());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn cancel_disarms_pending_signal() {
        let mut test = ReactionTest::new();
        let now = Instant::now();
        test.start(now, DELAY);
        assert!(test.has_pending_timer());

        test.cancel();
        assert!(!test.has_pending_timer());
        assert!(!test.tick(now + Duration::from_secs(10)));
        assert_eq!(test.phase(), Phase::Idle);
    }

    #[test]
    fn random_delay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let delay = random_delay(&mut rng);
            assert!(delay >= MIN_DELAY && delay <= MAX_DELAY);
        }
    }
}
