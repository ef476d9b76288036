// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed auto-advance with user override.
//!
//! [`Autoplay`] owns the active index and the single interval handle of one
//! carousel. It cycles the index on a fixed period while the layout is large,
//! nobody has clicked an item and the host has not paused it.
//!
//! # Override latch
//!
//! [`Autoplay::on_user_select`] sets a latch that nothing in this type ever
//! clears. Layout changes still collapse the index on small layouts, but
//! returning to a large layout does not resume cycling. Only a fresh
//! [`Autoplay`] (a remount) starts without the latch.
//!
//! # Handles
//!
//! At most one [`TimerHandle`] is held at a time. [`Autoplay::start`] is a
//! no-op while one is held and [`Autoplay::stop`] retires it. Ticks carrying
//! any other handle are reported as [`Tick::Stale`] and change nothing.

use crate::time::Duration;
use crate::timer::{Timer, TimerHandle};
use crate::viewport::Layout;

/// Configuration for [`Autoplay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Time between two advances.
    pub interval: Duration,
}

impl AutoplayConfig {
    /// The feature carousel preset: advance every six seconds.
    #[must_use]
    pub const fn feature_carousel() -> Self {
        Self {
            interval: Duration::from_secs(6),
        }
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self::feature_carousel()
    }
}

/// Why a running interval was cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The layout dropped below the large breakpoint.
    LayoutCollapsed,
    /// The user picked an item.
    UserSelected,
    /// The host paused autoplay.
    Paused,
    /// The item list became empty.
    ItemsCleared,
    /// The carousel was torn down.
    Unmounted,
}

/// Effect of a state transition on the interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerChange {
    /// No interval was armed or cleared.
    Unchanged,
    /// A new interval was armed.
    Started(TimerHandle),
    /// The held interval was cleared.
    Stopped(TimerHandle, StopReason),
}

/// Outcome of delivering a timer firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tick {
    /// The active index moved.
    Advanced {
        /// Index before the tick.
        from: Option<usize>,
        /// Index after the tick.
        to: usize,
    },
    /// The handle is not the one currently held; nothing changed.
    Stale,
}

/// Active-index cycler for one mounted carousel.
#[derive(Clone, Debug)]
pub struct Autoplay {
    config: AutoplayConfig,
    active_index: Option<usize>,
    user_override: bool,
    paused: bool,
    handle: Option<TimerHandle>,
}

impl Autoplay {
    /// Creates an idle cycler with no active index.
    #[must_use]
    pub const fn new(config: AutoplayConfig) -> Self {
        Self {
            config,
            active_index: None,
            user_override: false,
            paused: false,
            handle: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> AutoplayConfig {
        self.config
    }

    /// Returns the active index.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Returns whether a user selection has latched autoplay off.
    #[must_use]
    pub const fn is_user_override(&self) -> bool {
        self.user_override
    }

    /// Returns whether the host has paused autoplay.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the live interval handle, if any.
    #[must_use]
    pub const fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    /// Returns whether an interval is armed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Sets the index shown before the first tick (on mount).
    ///
    /// Out-of-range values clear the index.
    pub fn seed_index(&mut self, index: Option<usize>, item_count: usize) {
        self.active_index = index.filter(|&i| i < item_count);
    }

    /// Arms the interval if autoplay is allowed and none is armed yet.
    ///
    /// Autoplay is allowed on large layouts with at least one item, no user
    /// override and no pause.
    pub fn start(
        &mut self,
        timer: &mut dyn Timer,
        item_count: usize,
        layout: Layout,
    ) -> TimerChange {
        if self.handle.is_some()
            || self.paused
            || self.user_override
            || item_count == 0
            || !layout.is_large_layout
        {
            return TimerChange::Unchanged;
        }
        let handle = timer.set_interval(self.config.interval);
        self.handle = Some(handle);
        TimerChange::Started(handle)
    }

    /// Clears the armed interval, if any.
    ///
    /// The active index and the override latch are left alone.
    pub fn stop(&mut self, timer: &mut dyn Timer, reason: StopReason) -> TimerChange {
        match self.handle.take() {
            Some(handle) => {
                timer.clear_interval(handle);
                TimerChange::Stopped(handle, reason)
            }
            None => TimerChange::Unchanged,
        }
    }

    /// Reacts to a new viewport classification.
    ///
    /// Leaving the large layout stops the interval and clears the index.
    /// Entering or staying in it starts the interval unless overridden.
    pub fn on_layout_change(
        &mut self,
        timer: &mut dyn Timer,
        item_count: usize,
        layout: Layout,
    ) -> TimerChange {
        if layout.is_large_layout {
            self.start(timer, item_count, layout)
        } else {
            self.active_index = None;
            self.stop(timer, StopReason::LayoutCollapsed)
        }
    }

    /// Records a user selection and latches autoplay off.
    ///
    /// Below the large breakpoint nothing is highlighted, so the index stays
    /// cleared there; the latch is set either way.
    pub fn on_user_select(
        &mut self,
        timer: &mut dyn Timer,
        index: usize,
        layout: Layout,
    ) -> TimerChange {
        self.active_index = layout.is_large_layout.then_some(index);
        self.user_override = true;
        self.stop(timer, StopReason::UserSelected)
    }

    /// Reacts to the item list being replaced.
    ///
    /// An index that no longer points at an item is cleared. An empty list
    /// stops the interval; a non-empty one starts it when allowed.
    pub fn on_items_change(
        &mut self,
        timer: &mut dyn Timer,
        item_count: usize,
        layout: Layout,
    ) -> TimerChange {
        if self.active_index.is_some_and(|i| i >= item_count) {
            self.active_index = None;
        }
        if item_count == 0 {
            self.stop(timer, StopReason::ItemsCleared)
        } else {
            self.start(timer, item_count, layout)
        }
    }

    /// Suppresses autoplay regardless of layout.
    pub fn pause(&mut self, timer: &mut dyn Timer) -> TimerChange {
        self.paused = true;
        self.stop(timer, StopReason::Paused)
    }

    /// Lifts a [`pause`](Self::pause) and starts the interval when allowed.
    pub fn resume(
        &mut self,
        timer: &mut dyn Timer,
        item_count: usize,
        layout: Layout,
    ) -> TimerChange {
        self.paused = false;
        self.start(timer, item_count, layout)
    }

    /// Delivers one firing of `handle`.
    ///
    /// Moves the index to the next item, wrapping at `item_count`. No index
    /// yet moves to the first item.
    pub fn on_tick(&mut self, handle: TimerHandle, item_count: usize) -> Tick {
        if self.handle != Some(handle) || item_count == 0 {
            return Tick::Stale;
        }
        let from = self.active_index;
        let to = match from {
            Some(i) if i + 1 < item_count => i + 1,
            _ => 0,
        };
        self.active_index = Some(to);
        Tick::Advanced { from, to }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::time::HostTime;

    #[derive(Default)]
    struct CountingTimer {
        next_id: i32,
        armed: Vec<TimerHandle>,
        cleared: Vec<TimerHandle>,
    }

    impl Timer for CountingTimer {
        fn now(&self) -> HostTime {
            HostTime::ZERO
        }
        fn set_interval(&mut self, period: Duration) -> TimerHandle {
            assert_eq!(period, Duration::from_millis(6000), "feature carousel period");
            self.next_id += 1;
            let handle = TimerHandle(self.next_id);
            self.armed.push(handle);
            handle
        }
        fn clear_interval(&mut self, handle: TimerHandle) {
            self.armed.retain(|&h| h != handle);
            self.cleared.push(handle);
        }
    }

    const LARGE: Layout = Layout {
        is_large_layout: true,
        is_touch_capable: false,
    };
    const SMALL: Layout = Layout {
        is_large_layout: false,
        is_touch_capable: false,
    };

    #[test]
    fn start_is_idempotent() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        assert_eq!(
            autoplay.start(&mut timer, 3, LARGE),
            TimerChange::Started(TimerHandle(1))
        );
        assert_eq!(autoplay.start(&mut timer, 3, LARGE), TimerChange::Unchanged);
        assert_eq!(timer.armed.len(), 1, "one live interval");
    }

    #[test]
    fn start_refuses_without_items_or_large_layout() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        assert_eq!(autoplay.start(&mut timer, 0, LARGE), TimerChange::Unchanged);
        assert_eq!(autoplay.start(&mut timer, 3, SMALL), TimerChange::Unchanged);
        assert!(timer.armed.is_empty());
        assert_eq!(autoplay.active_index(), None);
    }

    #[test]
    fn ticks_wrap_around() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.seed_index(Some(0), 3);
        let TimerChange::Started(h) = autoplay.start(&mut timer, 3, LARGE) else {
            panic!("expected start");
        };
        let seen: Vec<_> = (0..4)
            .map(|_| match autoplay.on_tick(h, 3) {
                Tick::Advanced { to, .. } => to,
                Tick::Stale => usize::MAX,
            })
            .collect();
        assert_eq!(seen, [1, 2, 0, 1]);
    }

    #[test]
    fn first_tick_without_index_selects_first_item() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        let TimerChange::Started(h) = autoplay.start(&mut timer, 2, LARGE) else {
            panic!("expected start");
        };
        assert_eq!(autoplay.on_tick(h, 2), Tick::Advanced { from: None, to: 0 });
    }

    #[test]
    fn single_item_keeps_ticking_in_place() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.seed_index(Some(0), 1);
        let TimerChange::Started(h) = autoplay.start(&mut timer, 1, LARGE) else {
            panic!("expected start");
        };
        for _ in 0..3 {
            assert_eq!(
                autoplay.on_tick(h, 1),
                Tick::Advanced {
                    from: Some(0),
                    to: 0
                }
            );
        }
        assert!(autoplay.is_running());
    }

    #[test]
    fn retired_handle_is_stale() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.seed_index(Some(0), 3);
        let TimerChange::Started(old) = autoplay.start(&mut timer, 3, LARGE) else {
            panic!("expected start");
        };
        autoplay.stop(&mut timer, StopReason::Paused);
        let TimerChange::Started(new) = autoplay.start(&mut timer, 3, LARGE) else {
            panic!("expected restart");
        };
        assert_ne!(old, new);
        assert_eq!(autoplay.on_tick(old, 3), Tick::Stale);
        assert_eq!(autoplay.active_index(), Some(0), "stale tick changed nothing");
    }

    #[test]
    fn collapse_clears_index_but_keeps_override() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.start(&mut timer, 3, LARGE);
        autoplay.on_user_select(&mut timer, 1, LARGE);
        assert!(autoplay.is_user_override());
        assert!(!autoplay.is_running());

        autoplay.on_layout_change(&mut timer, 3, SMALL);
        assert_eq!(autoplay.active_index(), None);
        assert!(autoplay.is_user_override(), "latch survives collapse");

        assert_eq!(
            autoplay.on_layout_change(&mut timer, 3, LARGE),
            TimerChange::Unchanged,
            "no resume after override"
        );
    }

    #[test]
    fn pause_blocks_start_until_resume() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.start(&mut timer, 3, LARGE);
        assert!(matches!(
            autoplay.pause(&mut timer),
            TimerChange::Stopped(_, StopReason::Paused)
        ));
        assert_eq!(autoplay.on_layout_change(&mut timer, 3, LARGE), TimerChange::Unchanged);
        assert!(matches!(
            autoplay.resume(&mut timer, 3, LARGE),
            TimerChange::Started(_)
        ));
    }

    #[test]
    fn emptying_items_stops_and_clears() {
        let mut timer = CountingTimer::default();
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.seed_index(Some(2), 3);
        autoplay.start(&mut timer, 3, LARGE);
        assert!(matches!(
            autoplay.on_items_change(&mut timer, 0, LARGE),
            TimerChange::Stopped(_, StopReason::ItemsCleared)
        ));
        assert_eq!(autoplay.active_index(), None);
        assert!(timer.armed.is_empty());
    }
}
