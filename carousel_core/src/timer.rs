// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Injected clock and repeating-timer contract.
//!
//! The engine never reads a wall clock or arms a platform timer itself. The
//! host hands it a [`Timer`], and later delivers each firing back through
//! [`Carousel::on_timer`](crate::engine::Carousel::on_timer) together with
//! the [`TimerHandle`] that fired. Because the engine compares that handle
//! against the one it currently holds, a callback that was already queued
//! when the interval was cleared cannot mutate state.

use core::fmt;

use crate::time::{Duration, HostTime};

/// Identifies one armed interval.
///
/// Values are chosen by the [`Timer`] implementation (the browser's
/// `setInterval` id on the web) and are opaque to the engine, which only
/// compares them for equality.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub i32);

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerHandle({})", self.0)
    }
}

/// A monotonic clock plus a repeating-timer facility.
///
/// Implemented by `carousel_backend_web::IntervalTimer` for browsers and by
/// `carousel_harness::VirtualTimer` for deterministic tests.
pub trait Timer {
    /// Returns the current host time.
    fn now(&self) -> HostTime;

    /// Arms a timer that fires every `period` until cleared.
    fn set_interval(&mut self, period: Duration) -> TimerHandle;

    /// Disarms the timer identified by `handle`.
    ///
    /// Clearing an unknown or already-cleared handle must be a no-op.
    fn clear_interval(&mut self, handle: TimerHandle);
}
