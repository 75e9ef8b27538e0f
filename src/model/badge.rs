//! Alert badge
//!
//! Count of active alerts shown on the Alerts tab. Polled every 30 s for the
//! whole process lifetime and refreshed out of band after alert mutations.

use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Default)]
pub struct AlertBadge {
    count: u64,
    next_poll: Option<Instant>,
}

impl AlertBadge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the repeating poll; later calls keep the running schedule
    pub fn start(&mut self, now: Instant) {
        if self.next_poll.is_none() {
            self.next_poll = Some(now + POLL_INTERVAL);
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_poll.is_some()
    }

    /// Whether a poll is due; re-arms the next one when it is
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.next_poll {
            Some(deadline) if now >= deadline => {
                self.next_poll = Some(now + POLL_INTERVAL);
                true
            }
            _ => false,
        }
    }

    pub fn set_count(&mut self, count: u64) {
        self.count = count;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Badge text, `None` when hidden
    pub fn label(&self) -> Option<String> {
        (self.count > 0).then(|| self.count.to_string())
    }
}
