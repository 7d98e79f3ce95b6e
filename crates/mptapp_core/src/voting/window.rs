//! Weekly voting window.
//!
//! # Invariants
//! - Closed from Saturday 17:00 through the end of Sunday; open otherwise.
//! - `window_at` is pure; the monitor only refreshes displayed status.

use crate::clock::{Clock, IntervalTimer};
use crate::model::schedule::{monday_of, weekday_index, SUNDAY_INDEX};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::time::Duration;

const SATURDAY_INDEX: u8 = 5;
const SATURDAY_CLOSING_HOUR: u32 = 17;

/// Whether votes are accepted at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotingWindow {
    Open { closes_at: NaiveDateTime },
    Closed { reopens_at: NaiveDateTime },
}

impl VotingWindow {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

pub fn window_at(now: NaiveDateTime) -> VotingWindow {
    let today = now.date();
    let index = weekday_index(today);
    let monday = monday_of(today);

    let closed = index == SUNDAY_INDEX
        || (index == SATURDAY_INDEX && now.hour() >= SATURDAY_CLOSING_HOUR);
    if closed {
        VotingWindow::Closed {
            reopens_at: at_offset(monday, 7, NaiveTime::MIN),
        }
    } else {
        VotingWindow::Open {
            closes_at: at_offset(
                monday,
                u64::from(SATURDAY_INDEX),
                NaiveTime::from_hms_opt(SATURDAY_CLOSING_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
            ),
        }
    }
}

fn at_offset(monday: NaiveDate, days: u64, time: NaiveTime) -> NaiveDateTime {
    monday
        .checked_add_days(Days::new(days))
        .unwrap_or(monday)
        .and_time(time)
}

/// Re-evaluates the window on a fixed interval for display purposes.
#[derive(Debug, Clone)]
pub struct VotingStatusMonitor {
    timer: IntervalTimer,
    current: Option<VotingWindow>,
}

impl VotingStatusMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: IntervalTimer::new(interval),
            current: None,
        }
    }

    /// Last evaluated window, if any poll has fired yet.
    pub fn current(&self) -> Option<VotingWindow> {
        self.current
    }

    /// Returns the new window when the timer fired and the window changed.
    pub fn poll(&mut self, clock: &impl Clock) -> Option<VotingWindow> {
        if !self.timer.poll(clock) {
            return None;
        }
        let window = window_at(clock.now_local());
        if self.current == Some(window) {
            return None;
        }
        self.current = Some(window);
        Some(window)
    }
}

#[cfg(test)]
mod tests {
    use super::{window_at, VotingStatusMonitor, VotingWindow};
    use crate::clock::ManualClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::time::Duration;

    fn at(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        // 2025-11-24 is a Monday.
        NaiveDate::from_ymd_opt(2025, 11, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn open_window_reports_saturday_close() {
        assert_eq!(
            window_at(at(26, 10, 0, 0)),
            VotingWindow::Open {
                closes_at: at(29, 17, 0, 0)
            }
        );
    }

    #[test]
    fn monitor_reports_only_changes() {
        let clock = ManualClock::new(at(29, 16, 58, 0));
        let mut monitor = VotingStatusMonitor::new(Duration::from_secs(60));

        assert!(monitor.poll(&clock).is_some_and(|w| w.is_open()));
        clock.advance(Duration::from_secs(60));
        assert_eq!(monitor.poll(&clock), None);
        clock.advance(Duration::from_secs(60));
        assert_eq!(
            monitor.poll(&clock),
            Some(VotingWindow::Closed {
                reopens_at: NaiveDate::from_ymd_opt(2025, 12, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            })
        );
    }
}
