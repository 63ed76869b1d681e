use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTick {
    /// Not started yet, or already fired.
    Idle,
    Running { remaining_secs: u64 },
    /// Reported exactly once, on the first tick at or past zero.
    Expired,
}

/// Countdown started by the first keystroke. Once it has fired it stays
/// finished until `reset`.
#[derive(Clone, Debug)]
pub struct Countdown {
    duration: Duration,
    started_at: Option<Instant>,
    fired: bool,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            fired: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns false if the countdown was already started or has fired.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() || self.fired {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.fired = false;
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => now.saturating_duration_since(start).min(self.duration),
            None => Duration::ZERO,
        }
    }

    /// Whole seconds left, counting down in one-second steps from the full
    /// duration.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        if self.fired {
            return 0;
        }
        self.duration.as_secs().saturating_sub(self.elapsed(now).as_secs())
    }

    pub fn tick(&mut self, now: Instant) -> TimerTick {
        if self.fired || self.started_at.is_none() {
            return TimerTick::Idle;
        }
        if self.elapsed(now) >= self.duration {
            self.fired = true;
            return TimerTick::Expired;
        }
        TimerTick::Running {
            remaining_secs: self.remaining_secs(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut timer = Countdown::new(Duration::from_secs(60));
        let now = Instant::now();
        assert_eq!(timer.tick(now), TimerTick::Idle);
        assert_eq!(timer.remaining_secs(now), 60);
    }

    #[test]
    fn test_counts_down_whole_seconds() {
        let mut timer = Countdown::new(Duration::from_secs(60));
        let t0 = Instant::now();
        assert!(timer.start(t0));
        assert_eq!(
            timer.tick(t0 + Duration::from_millis(999)),
            TimerTick::Running { remaining_secs: 60 }
        );
        assert_eq!(
            timer.tick(t0 + Duration::from_millis(1500)),
            TimerTick::Running { remaining_secs: 59 }
        );
    }

    #[test]
    fn test_fires_once() {
        let mut timer = Countdown::new(Duration::from_secs(2));
        let t0 = Instant::now();
        timer.start(t0);
        assert_eq!(timer.tick(t0 + Duration::from_secs(2)), TimerTick::Expired);
        assert_eq!(timer.tick(t0 + Duration::from_secs(3)), TimerTick::Idle);
        assert!(timer.has_fired());
        assert_eq!(timer.remaining_secs(t0 + Duration::from_secs(3)), 0);
    }

    #[test]
    fn test_cannot_restart_without_reset() {
        let mut timer = Countdown::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert!(timer.start(t0));
        assert!(!timer.start(t0 + Duration::from_millis(10)));
        timer.tick(t0 + Duration::from_secs(1));
        assert!(!timer.start(t0 + Duration::from_secs(2)));

        timer.reset();
        assert!(!timer.has_fired());
        assert!(timer.start(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn test_elapsed_capped_at_duration() {
        let mut timer = Countdown::new(Duration::from_secs(5));
        let t0 = Instant::now();
        timer.start(t0);
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(9)), Duration::from_secs(5));
    }
}
