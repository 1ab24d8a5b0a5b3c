use std::time::{Duration, Instant};

/// A one-shot deadline owned by whichever state machine scheduled it.
///
/// Nothing fires on its own: the owner observes expiry through [`fire`],
/// so a cancelled or dropped timer can never write stale state.
///
/// [`fire`]: ScheduledTimer::fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    started_at: Instant,
    deadline: Instant,
    armed: bool,
}

impl ScheduledTimer {
    pub fn schedule(now: Instant, delay: Duration) -> Self {
        Self {
            started_at: now,
            deadline: now + delay,
            armed: true,
        }
    }

    pub fn restart(&mut self, now: Instant, delay: Duration) {
        *self = Self::schedule(now, delay);
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.then_some(self.deadline)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Returns true exactly once: the first call strictly after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.armed && now > self.deadline {
            self.armed = false;
            true
        } else {
            false
        }
    }
}
