//! Periodic status update schedule.

use std::time::{Duration, SystemTime};

use crate::time::elapsed_between;

/// Decides when the next status update is due.
///
/// Status updates are independent of the alert cooldown. An update is due
/// when none has been sent yet or the interval has fully elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSchedule {
    enabled: bool,
    interval: Duration,
    last_sent: Option<SystemTime>,
}

impl StatusSchedule {
    /// Default interval between updates (1 hour).
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3600);

    /// Creates a schedule.
    ///
    /// `interval` is raised to `sampling` if shorter, since updates can only
    /// go out on a sampling tick. Without `on_startup` the first update
    /// waits a full interval from `now`.
    #[must_use]
    pub fn new(
        enabled: bool,
        interval: Duration,
        sampling: Duration,
        on_startup: bool,
        now: SystemTime,
    ) -> Self {
        if enabled && interval < sampling {
            tracing::warn!(
                interval_secs = interval.as_secs(),
                sampling_secs = sampling.as_secs(),
                "Status update interval shorter than sampling interval, using sampling interval"
            );
        }

        Self {
            enabled,
            interval: interval.max(sampling),
            last_sent: if on_startup { None } else { Some(now) },
        }
    }

    /// A schedule that never fires.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            interval: Self::DEFAULT_INTERVAL,
            last_sent: None,
        }
    }

    /// Returns true if status updates are on.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the effective interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if an update should go out at `now`.
    #[must_use]
    pub fn is_due(&self, now: SystemTime) -> bool {
        self.enabled
            && self
                .last_sent
                .is_none_or(|last| elapsed_between(last, now) >= self.interval)
    }

    /// Records an update attempt at `now`.
    pub const fn mark(&mut self, now: SystemTime) {
        self.last_sent = Some(now);
    }
}

impl Default for StatusSchedule {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLING: Duration = Duration::from_secs(60);

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn disabled_schedule_is_never_due() {
        let schedule = StatusSchedule::disabled();

        assert!(!schedule.is_due(at(0)));
        assert!(!schedule.is_due(at(1_000_000)));
    }

    #[test]
    fn on_startup_makes_first_tick_due() {
        let schedule = StatusSchedule::new(true, Duration::from_secs(120), SAMPLING, true, at(0));

        assert!(schedule.is_due(at(0)));
    }

    #[test]
    fn without_startup_first_update_waits_an_interval() {
        let schedule = StatusSchedule::new(true, Duration::from_secs(120), SAMPLING, false, at(0));

        assert!(!schedule.is_due(at(60)));
        assert!(schedule.is_due(at(120)));
    }

    #[test]
    fn due_again_once_interval_elapsed() {
        let mut schedule =
            StatusSchedule::new(true, Duration::from_secs(120), SAMPLING, true, at(0));
        schedule.mark(at(0));

        assert!(!schedule.is_due(at(60)));
        assert!(schedule.is_due(at(120)));
        assert!(schedule.is_due(at(180)));
    }

    #[test]
    fn interval_is_raised_to_sampling() {
        let schedule = StatusSchedule::new(true, Duration::from_secs(30), SAMPLING, true, at(0));

        assert_eq!(schedule.interval(), SAMPLING);
    }

    #[test]
    fn clock_going_backwards_is_not_due() {
        let mut schedule =
            StatusSchedule::new(true, Duration::from_secs(120), SAMPLING, true, at(0));
        schedule.mark(at(1_000));

        assert!(!schedule.is_due(at(500)));
    }
}
