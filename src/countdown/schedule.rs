//! Periodic tick deadline
//!
//! The event loop has no timer thread. It asks the schedule how long it may
//! block waiting for input, then polls it to see whether a tick is due.

use std::time::{Duration, Instant};
use tracing::debug;

/// Fixed-interval tick with cancellation
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl TickSchedule {
    /// Schedule whose first tick is one `interval` after `now`
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_deadline: Some(now + interval),
        }
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        self.next_deadline.is_none()
    }

    /// How long the caller may wait before the next tick; `None` once cancelled
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Whether a tick is due at `now`; a due tick re-arms the next deadline
    ///
    /// Missed intervals (e.g. after a system sleep) collapse into a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let mut next = deadline + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.next_deadline = Some(next);
        true
    }

    /// Stop ticking; further polls never fire
    pub fn cancel(&mut self) {
        if self.next_deadline.take().is_some() {
            debug!("Tick schedule cancelled");
        }
    }
}
