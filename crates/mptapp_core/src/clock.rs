//! Injected time capability and pull-based interval timers.
//!
//! # Responsibility
//! - Provide wall-clock reads through a trait so callers can swap in virtual
//!   time.
//! - Drive periodic re-checks (voting status, content version) without
//!   owning any OS timer.
//!
//! # Invariants
//! - `now_local` is local wall-clock time and is the only input of calendar
//!   rules (weekday, hour).
//! - `now_millis` is monotonic enough for cache ages; ages saturate at zero
//!   when the clock moves backwards.

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Time source used by every time-dependent rule in core.
pub trait Clock {
    /// Local wall-clock time.
    fn now_local(&self) -> NaiveDateTime;

    /// Epoch milliseconds used for persisted timestamps.
    fn now_millis(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_local(&self) -> NaiveDateTime {
        (**self).now_local()
    }

    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_local(&self) -> NaiveDateTime {
        (**self).now_local()
    }

    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Process clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Virtual clock for deterministic tests.
///
/// Local time and epoch millis move together; the local time is treated as
/// if it were UTC when converting to millis.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let step = ChronoDuration::from_std(step).unwrap_or(ChronoDuration::zero());
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += step;
    }

    /// Jumps the clock to an absolute local time.
    pub fn set(&self, value: NaiveDateTime) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = value;
    }
}

impl Clock for ManualClock {
    fn now_local(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn now_millis(&self) -> i64 {
        self.now_local().and_utc().timestamp_millis()
    }
}

/// Returns elapsed time between two epoch-millis readings, floored at zero.
pub fn elapsed_between(earlier_ms: i64, later_ms: i64) -> Duration {
    let delta = later_ms.saturating_sub(earlier_ms);
    Duration::from_millis(u64::try_from(delta).unwrap_or(0))
}

/// Fixed-interval ticker polled against a [`Clock`].
///
/// The first poll always fires so status is computed immediately after
/// construction.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    last_fired_ms: Option<i64>,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired_ms: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` when the interval has elapsed since the last fire, and
    /// records the fire.
    pub fn poll(&mut self, clock: &impl Clock) -> bool {
        let now = clock.now_millis();
        let due = match self.last_fired_ms {
            None => true,
            Some(last) => elapsed_between(last, now) >= self.interval,
        };
        if due {
            self.last_fired_ms = Some(now);
        }
        due
    }

    /// Forgets the last fire so the next poll fires immediately.
    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}
