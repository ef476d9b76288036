// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual clock with an interval queue.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use carousel_core::time::{Duration, HostTime};
use carousel_core::timer::{Timer, TimerHandle};

#[derive(Clone, Copy, Debug)]
struct Interval {
    handle: TimerHandle,
    period: Duration,
    next_due: HostTime,
}

#[derive(Debug, Default)]
struct Clock {
    now: HostTime,
    next_id: i32,
    intervals: Vec<Interval>,
    armed_total: u32,
    cleared_total: u32,
}

/// A [`Timer`] whose clock only moves when told to.
///
/// Clones share the same clock and queue, so a test can keep one clone while
/// the carousel owns another.
#[derive(Clone, Debug, Default)]
pub struct VirtualTimer {
    clock: Rc<RefCell<Clock>>,
}

impl VirtualTimer {
    /// Creates a timer at time zero with no intervals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handles of all armed intervals, oldest first.
    #[must_use]
    pub fn live_handles(&self) -> Vec<TimerHandle> {
        self.clock.borrow().intervals.iter().map(|i| i.handle).collect()
    }

    /// Returns how many intervals are armed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.clock.borrow().intervals.len()
    }

    /// Returns how many intervals were ever armed.
    #[must_use]
    pub fn armed_total(&self) -> u32 {
        self.clock.borrow().armed_total
    }

    /// Returns how many intervals were ever cleared.
    #[must_use]
    pub fn cleared_total(&self) -> u32 {
        self.clock.borrow().cleared_total
    }

    /// Pops the earliest firing due at or before `deadline`.
    ///
    /// Moves the clock to the firing time and reschedules the interval.
    /// Firings due at the same instant come out in arming order.
    pub fn pop_due(&self, deadline: HostTime) -> Option<TimerHandle> {
        let mut clock = self.clock.borrow_mut();
        let next = clock
            .intervals
            .iter_mut()
            .filter(|i| i.next_due <= deadline)
            .min_by_key(|i| i.next_due)?;
        let due = next.next_due;
        let handle = next.handle;
        next.next_due = due + next.period;
        clock.now = due;
        Some(handle)
    }

    /// Moves the clock to `at` without firing anything.
    ///
    /// Times in the past are ignored.
    pub fn set_now(&self, at: HostTime) {
        let mut clock = self.clock.borrow_mut();
        if at > clock.now {
            clock.now = at;
        }
    }
}

impl Timer for VirtualTimer {
    fn now(&self) -> HostTime {
        self.clock.borrow().now
    }

    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        clock.armed_total += 1;
        let handle = TimerHandle(clock.next_id);
        let next_due = clock.now + period;
        clock.intervals.push(Interval {
            handle,
            period,
            next_due,
        });
        handle
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        let mut clock = self.clock.borrow_mut();
        let before = clock.intervals.len();
        clock.intervals.retain(|i| i.handle != handle);
        if clock.intervals.len() != before {
            clock.cleared_total += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_fire_on_their_period() {
        let mut timer = VirtualTimer::new();
        let h = timer.set_interval(Duration::from_millis(100));
        let end = HostTime(250);
        assert_eq!(timer.pop_due(end), Some(h), "fires at 100");
        assert_eq!(timer.now(), HostTime(100));
        assert_eq!(timer.pop_due(end), Some(h), "fires at 200");
        assert_eq!(timer.pop_due(end), None, "300 is past the deadline");
    }

    #[test]
    fn cleared_intervals_never_fire() {
        let mut timer = VirtualTimer::new();
        let h = timer.set_interval(Duration::from_millis(10));
        timer.clear_interval(h);
        timer.clear_interval(h);
        assert_eq!(timer.pop_due(HostTime(1000)), None, "cleared");
        assert_eq!(timer.cleared_total(), 1, "double clear counted once");
    }

    #[test]
    fn earliest_interval_fires_first() {
        let mut timer = VirtualTimer::new();
        let slow = timer.set_interval(Duration::from_millis(30));
        let fast = timer.set_interval(Duration::from_millis(20));
        let end = HostTime(45);
        assert_eq!(timer.pop_due(end), Some(fast), "20");
        assert_eq!(timer.pop_due(end), Some(slow), "30");
        assert_eq!(timer.pop_due(end), Some(fast), "40");
        assert_eq!(timer.pop_due(end), None, "60 is too late");
    }
}
