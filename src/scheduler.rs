//! Fixed-cadence tick scheduling
//!
//! The scheduler decides how many ticks are owed at a given instant; the
//! caller runs them. It never reads the clock itself, so tests can drive it
//! with synthetic instants.

use std::time::{Duration, Instant};

use crate::consts::MAX_CATCH_UP;

#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Instant,
    paused: bool,
}

impl TickScheduler {
    /// First tick is due one interval after `now`
    pub fn new(ticks_per_second: u32, now: Instant) -> Self {
        let interval = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            interval,
            next_due: now + interval,
            paused: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick should run, never earlier than `now`
    pub fn next_tick_due(&self, now: Instant) -> Instant {
        self.next_due.max(now)
    }

    /// Number of ticks to run at `now`, advancing the schedule past them
    ///
    /// At most `MAX_CATCH_UP` ticks are owed at once. A larger backlog is
    /// dropped and the schedule restarts from `now`.
    pub fn ticks_due(&mut self, now: Instant) -> u32 {
        if self.paused {
            return 0;
        }

        let mut due = 0;
        while self.next_due <= now && due < MAX_CATCH_UP {
            self.next_due += self.interval;
            due += 1;
        }

        if self.next_due <= now {
            log::warn!("Tick backlog exceeded {} ticks; skipping ahead", MAX_CATCH_UP);
            self.next_due = now + self.interval;
        }
        due
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop owing ticks; a tick in progress is never interrupted
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume with the next tick one interval after `now`
    pub fn resume(&mut self, now: Instant) {
        if self.paused {
            self.paused = false;
            self.next_due = now + self.interval;
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        if self.paused {
            self.resume(now);
        } else {
            self.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_rate() {
        let s = TickScheduler::new(50, Instant::now());
        assert_eq!(s.interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_ticks_due_follow_elapsed_time() {
        let start = Instant::now();
        let mut s = TickScheduler::new(50, start);

        assert_eq!(s.ticks_due(start), 0);
        assert_eq!(s.ticks_due(start + Duration::from_millis(20)), 1);
        assert_eq!(s.ticks_due(start + Duration::from_millis(30)), 0);
        assert_eq!(s.ticks_due(start + Duration::from_millis(80)), 3);
        assert_eq!(
            s.next_tick_due(start + Duration::from_millis(80)),
            start + Duration::from_millis(100)
        );
    }

    #[test]
    fn test_catch_up_is_capped() {
        let start = Instant::now();
        let mut s = TickScheduler::new(50, start);
        let late = start + Duration::from_secs(10);

        assert_eq!(s.ticks_due(late), MAX_CATCH_UP);
        // Backlog dropped: next tick is one interval after the stall
        assert_eq!(s.next_tick_due(late), late + Duration::from_millis(20));
        assert_eq!(s.ticks_due(late + Duration::from_millis(20)), 1);
    }

    #[test]
    fn test_pause_owes_nothing() {
        let start = Instant::now();
        let mut s = TickScheduler::new(50, start);
        s.pause();
        assert!(s.is_paused());
        assert_eq!(s.ticks_due(start + Duration::from_secs(1)), 0);

        let resumed_at = start + Duration::from_secs(1);
        s.toggle_pause(resumed_at);
        assert!(!s.is_paused());
        assert_eq!(s.ticks_due(resumed_at), 0);
        assert_eq!(s.ticks_due(resumed_at + Duration::from_millis(20)), 1);
    }

    #[test]
    fn test_next_tick_due_never_in_past() {
        let start = Instant::now();
        let s = TickScheduler::new(60, start);
        let later = start + Duration::from_secs(5);
        assert_eq!(s.next_tick_due(later), later);
    }
}
