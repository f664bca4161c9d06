use std::time::{Duration, Instant};

/// Fixed-rate frame deadlines.
///
/// Deadlines advance by whole intervals so the average rate stays at the
/// configured value even when individual frames are served late. If the
/// clock falls more than one interval behind, it resynchronizes to the
/// current time instead of firing a burst of catch-up frames.
///
/// With no interval set the clock never fires.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval: Option<Duration>,
    next_deadline: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            interval: None,
            next_deadline: now,
        }
    }

    /// Sets the frame rate in frames per second; `None` stops frames.
    pub fn set_rate(&mut self, rate: Option<f64>, now: Instant) {
        self.set_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)), now);
    }

    pub fn set_interval(&mut self, interval: Option<Duration>, now: Instant) {
        self.interval = interval;
        self.next_deadline = now + interval.unwrap_or_default();
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.interval.map(|_| self.next_deadline)
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.interval.is_some() && now >= self.next_deadline
    }

    /// Consumes the current deadline and schedules the next one.
    pub fn mark(&mut self, now: Instant) {
        let Some(interval) = self.interval else {
            return;
        };
        self.next_deadline += interval;
        if self.next_deadline + interval < now {
            self.next_deadline = now + interval;
        }
    }

    /// Time to wait for input before the next deadline, `None` to wait indefinitely.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_disabled_clock_never_fires() {
        let start = Instant::now();
        let clock = FrameClock::new(start);
        assert!(!clock.is_due(start + 1000 * MS));
        assert_eq!(clock.poll_timeout(start), None);
        assert_eq!(clock.next_deadline(), None);
    }

    #[test]
    fn test_first_frame_after_one_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.set_interval(Some(40 * MS), start);

        assert!(!clock.is_due(start + 39 * MS));
        assert!(clock.is_due(start + 40 * MS));
        assert_eq!(clock.poll_timeout(start + 10 * MS), Some(30 * MS));
        assert_eq!(clock.poll_timeout(start + 50 * MS), Some(Duration::ZERO));
    }

    #[test]
    fn test_mark_keeps_fixed_cadence() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.set_interval(Some(40 * MS), start);

        // served 5ms late, next deadline still on the 40ms grid
        clock.mark(start + 45 * MS);
        assert_eq!(clock.next_deadline(), Some(start + 80 * MS));
    }

    #[test]
    fn test_mark_resynchronizes_when_far_behind() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.set_interval(Some(40 * MS), start);

        clock.mark(start + 500 * MS);
        assert_eq!(clock.next_deadline(), Some(start + 540 * MS));
    }

    #[test]
    fn test_set_rate_converts_fps() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.set_rate(Some(25.0), start);
        assert_eq!(clock.interval(), Some(40 * MS));
        clock.set_rate(None, start);
        assert!(!clock.is_due(start + 100 * MS));
    }
}
