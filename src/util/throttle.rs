//! Fixed-interval event throttling
//!
//! Rapid-fire events (held arrow keys) are coalesced so at most one is handled
//! per interval. The first event always passes.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if an event arriving now should be handled
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    /// Same as [`Throttle::ready`] with an explicit clock reading
    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last handled event
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_passes() {
        let mut throttle = Throttle::from_millis(100);
        assert!(throttle.ready_at(Instant::now()));
    }

    #[test]
    fn test_events_inside_interval_are_dropped() {
        let mut throttle = Throttle::from_millis(100);
        let t0 = Instant::now();
        assert!(throttle.ready_at(t0));
        assert!(!throttle.ready_at(t0 + Duration::from_millis(30)));
        assert!(!throttle.ready_at(t0 + Duration::from_millis(99)));
        assert!(throttle.ready_at(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_reset_lets_next_event_through() {
        let mut throttle = Throttle::from_millis(100);
        let t0 = Instant::now();
        assert!(throttle.ready_at(t0));
        throttle.reset();
        assert!(throttle.ready_at(t0 + Duration::from_millis(1)));
    }
}
