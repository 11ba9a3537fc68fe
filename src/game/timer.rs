use std::time::{Duration, Instant};

/// A periodic timer, expressed as the deadline for its next firing.  Dropping
/// a `Ticker` cancels it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    deadline: Instant,
}

impl Ticker {
    /// Start a timer that first fires one `period` after `now`
    pub(crate) fn start(period: Duration, now: Instant) -> Ticker {
        Ticker {
            period,
            deadline: now + period,
        }
    }

    #[cfg(test)]
    pub(crate) fn deadline(&self) -> Instant {
        self.deadline
    }

    /// How long from `now` until the timer fires
    pub(crate) fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// If the deadline has been reached as of `now`, schedule the next firing
    /// and return `true`.  Firings missed by more than one period are skipped
    /// rather than delivered in a burst.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.deadline += self.period;
        if self.deadline <= now {
            self.deadline = now + self.period;
        }
        true
    }
}
