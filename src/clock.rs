use std::time::Duration;

/// Session countdown, advanced by ticks from the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
}

impl Countdown {
    pub fn new(secs: u64) -> Self {
        let total = Duration::from_secs(secs);
        Self {
            total,
            remaining: total,
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    pub fn expire(&mut self) {
        self.remaining = Duration::ZERO;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whole seconds since the session started
    pub fn seconds_elapsed(&self) -> u64 {
        (self.total - self.remaining).as_secs()
    }

    /// Remaining time rounded up, for display
    pub fn seconds_remaining(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}
