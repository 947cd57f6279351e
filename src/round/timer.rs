//! Cooperative timers. They hold no threads or callbacks. The owner advances
//! them from its tick, so dropping the owner cancels them.

use std::time::Duration;

/// One-shot delay, e.g. the feedback pause between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    remaining: Duration,
}

impl Delay {
    pub fn new(duration: Duration) -> Self {
        Self { remaining: duration }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Returns true once the delay has fully elapsed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.remaining.is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Running { seconds_left: u64 },
    Expired,
}

/// Per-round countdown for timed games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
}

impl Countdown {
    pub fn new(total: Duration) -> Self {
        Self { total, remaining: total }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whole seconds shown on the clock, rounded up.
    pub fn seconds_left(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Remaining share of the full countdown, 1.0 when fresh.
    pub fn ratio(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.remaining.as_secs_f64() / self.total.as_secs_f64()
    }

    pub fn advance(&mut self, elapsed: Duration) -> CountdownStatus {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            CountdownStatus::Expired
        } else {
            CountdownStatus::Running { seconds_left: self.seconds_left() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_fires_after_duration() {
        let mut d = Delay::new(Duration::from_millis(1500));
        assert!(!d.advance(Duration::from_millis(1000)));
        assert_eq!(d.remaining(), Duration::from_millis(500));
        assert!(d.advance(Duration::from_millis(600)));
        assert!(d.advance(Duration::from_millis(1)));
    }

    #[test]
    fn countdown_rounds_seconds_up() {
        let mut c = Countdown::new(Duration::from_secs(10));
        assert_eq!(c.seconds_left(), 10);
        assert_eq!(
            c.advance(Duration::from_millis(100)),
            CountdownStatus::Running { seconds_left: 10 }
        );
        assert_eq!(
            c.advance(Duration::from_millis(900)),
            CountdownStatus::Running { seconds_left: 9 }
        );
        assert!((c.ratio() - 0.9).abs() < 1e-9);
        assert_eq!(c.advance(Duration::from_secs(20)), CountdownStatus::Expired);
        assert_eq!(c.seconds_left(), 0);
    }
}
