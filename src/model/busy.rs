//! Busy overlay state
//!
//! Reentrant show/hide of the blocking overlay. `begin` never stacks a second
//! overlay, `end` is safe without a matching `begin`, and every `begin` arms
//! a 30 s safety deadline that force-clears everything when it passes.

use std::time::{Duration, Instant};

/// Ceiling after which a forgotten `end` is forced
pub const SAFETY_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay before residual overlay state is force-cleared after the last `end`
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, Default)]
pub struct BusyState {
    depth: u32,
    overlay_mounted: bool,
    /// How many overlays were ever mounted
    mounts: u64,
    safety_deadline: Option<Instant>,
    settle_deadline: Option<Instant>,
}

/// What `tick` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyTick {
    Idle,
    Settled,
    SafetyFired,
}

impl BusyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, now: Instant) {
        self.depth += 1;
        if !self.overlay_mounted {
            self.overlay_mounted = true;
            self.mounts += 1;
        }
        self.settle_deadline = None;
        self.safety_deadline = Some(now + SAFETY_TIMEOUT);
    }

    pub fn end(&mut self, now: Instant) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.safety_deadline = None;
            self.settle_deadline = Some(now + SETTLE_DELAY);
        }
    }

    /// Drop all busy state at once
    pub fn force_clear(&mut self) {
        self.depth = 0;
        self.overlay_mounted = false;
        self.safety_deadline = None;
        self.settle_deadline = None;
    }

    /// Advance the timers
    pub fn tick(&mut self, now: Instant) -> BusyTick {
        if self.safety_deadline.is_some_and(|deadline| now >= deadline) {
            self.force_clear();
            return BusyTick::SafetyFired;
        }

        if self.settle_deadline.is_some_and(|deadline| now >= deadline) {
            self.settle_deadline = None;
            if self.depth == 0 {
                self.overlay_mounted = false;
                return BusyTick::Settled;
            }
        }

        BusyTick::Idle
    }

    /// Whether the overlay is drawn
    pub fn is_visible(&self) -> bool {
        self.depth > 0
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Overlay state still mounted (visible or waiting to settle)
    pub fn overlay_mounted(&self) -> bool {
        self.overlay_mounted
    }

    pub fn mounts(&self) -> u64 {
        self.mounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_without_begin_is_harmless() {
        let now = Instant::now();
        let mut busy = BusyState::new();
        busy.end(now);
        busy.end(now);
        assert!(!busy.is_visible());
        assert_eq!(busy.depth(), 0);
    }

    #[test]
    fn test_nested_begin_reuses_overlay() {
        let now = Instant::now();
        let mut busy = BusyState::new();
        busy.begin(now);
        busy.begin(now);
        assert!(busy.is_visible());
        assert_eq!(busy.mounts(), 1);

        busy.end(now);
        assert!(busy.is_visible());
        busy.end(now);
        assert!(!busy.is_visible());
    }

    #[test]
    fn test_settle_clears_residual_overlay() {
        let now = Instant::now();
        let mut busy = BusyState::new();
        busy.begin(now);
        busy.end(now);
        assert!(busy.overlay_mounted());

        assert_eq!(busy.tick(now + Duration::from_millis(50)), BusyTick::Idle);
        assert_eq!(busy.tick(now + SETTLE_DELAY), BusyTick::Settled);
        assert!(!busy.overlay_mounted());
    }

    #[test]
    fn test_begin_during_settle_keeps_overlay() {
        let now = Instant::now();
        let mut busy = BusyState::new();
        busy.begin(now);
        busy.end(now);
        busy.begin(now + Duration::from_millis(20));

        assert_eq!(busy.tick(now + SETTLE_DELAY), BusyTick::Idle);
        assert!(busy.overlay_mounted());
        assert!(busy.is_visible());
        assert_eq!(busy.mounts(), 1);
    }

    #[test]
    fn test_safety_timeout_forces_end() {
        let now = Instant::now();
        let mut busy = BusyState::new();
        busy.begin(now);
        busy.begin(now);

        assert_eq!(busy.tick(now + Duration::from_secs(29)), BusyTick::Idle);
        assert_eq!(busy.tick(now + SAFETY_TIMEOUT), BusyTick::SafetyFired);
        assert!(!busy.is_visible());
        assert!(!busy.overlay_mounted());

        // A late end after the forced clear stays harmless
        busy.end(now + SAFETY_TIMEOUT);
        assert_eq!(busy.depth(), 0);
    }

    #[test]
    fn test_each_begin_rearms_safety() {
        let now = Instant::now();
        let mut busy = BusyState::new();
        busy.begin(now);
        busy.begin(now + Duration::from_secs(20));

        assert_eq!(busy.tick(now + SAFETY_TIMEOUT), BusyTick::Idle);
        assert_eq!(
            busy.tick(now + Duration::from_secs(20) + SAFETY_TIMEOUT),
            BusyTick::SafetyFired
        );
    }

    #[test]
    fn test_visibility_tracks_unmatched_begins() {
        let now = Instant::now();
        // Sequences of true = begin, false = end
        let sequences: &[&[bool]] = &[
            &[true, false],
            &[false, true],
            &[true, true, false],
            &[true, false, false, true],
            &[false, false, false],
            &[true, true, true, false, false, false],
        ];

        for seq in sequences {
            let mut busy = BusyState::new();
            let mut open: u32 = 0;
            for step in seq.iter() {
                if *step {
                    busy.begin(now);
                    open += 1;
                } else {
                    busy.end(now);
                    open = open.saturating_sub(1);
                }
            }
            busy.tick(now + SETTLE_DELAY);
            assert_eq!(busy.is_visible(), open > 0, "sequence {:?}", seq);
            assert!(busy.mounts() <= 2);
        }
    }
}
