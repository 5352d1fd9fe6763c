//! Per-kind cooldown tracking.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

use super::kind::AlertKind;
use crate::time::{Clock, SystemClock, elapsed_between};

/// Gates repeated alerts of the same kind within a time window.
///
/// Entries never expire on their own; a kind becomes sendable again once
/// the window has elapsed since its last recorded send.
///
/// # Example
///
/// ```
/// use roomwatch::alert::{AlertKind, CooldownTracker};
/// use std::time::Duration;
///
/// let tracker = CooldownTracker::new(Duration::from_secs(900));
/// let kind = AlertKind::custom("test");
///
/// assert!(tracker.try_acquire(&kind));
/// assert!(!tracker.try_acquire(&kind));
/// ```
#[derive(Debug)]
pub struct CooldownTracker<C = SystemClock> {
    window: Duration,
    clock: C,
    last_sent: Mutex<HashMap<AlertKind, SystemTime>>,
}

impl CooldownTracker<SystemClock> {
    /// Default cooldown window (15 minutes).
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(900);

    /// Creates a tracker that reads the system clock.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, SystemClock)
    }
}

impl Default for CooldownTracker<SystemClock> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl<C: Clock> CooldownTracker<C> {
    /// Creates a tracker with an explicit clock.
    #[must_use]
    pub fn with_clock(window: Duration, clock: C) -> Self {
        Self {
            window,
            clock,
            last_sent: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cooldown window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Returns true if `kind` was never sent or its window has elapsed.
    #[must_use]
    pub fn can_send(&self, kind: &AlertKind) -> bool {
        let now = self.clock.now();
        self.is_open(self.last_sent.lock().get(kind).copied(), now)
    }

    /// Records `kind` as sent now.
    pub fn mark_sent(&self, kind: AlertKind) {
        let now = self.clock.now();
        self.last_sent.lock().insert(kind, now);
    }

    /// Checks and marks `kind` under a single lock hold.
    ///
    /// Of several concurrent callers for the same kind, exactly one gets
    /// `true` per window.
    #[must_use]
    pub fn try_acquire(&self, kind: &AlertKind) -> bool {
        let now = self.clock.now();
        let mut last_sent = self.last_sent.lock();

        if !self.is_open(last_sent.get(kind).copied(), now) {
            return false;
        }

        last_sent.insert(kind.clone(), now);
        true
    }

    /// Returns when `kind` was last recorded as sent.
    #[must_use]
    pub fn last_sent(&self, kind: &AlertKind) -> Option<SystemTime> {
        self.last_sent.lock().get(kind).copied()
    }

    /// Forgets every recorded send.
    pub fn reset(&self) {
        self.last_sent.lock().clear();
    }

    fn is_open(&self, last: Option<SystemTime>, now: SystemTime) -> bool {
        last.is_none_or(|last| elapsed_between(last, now) >= self.window)
    }
}
