// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the carousel engine.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the engine calls at each state transition. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::autoplay::StopReason;
use crate::media::MediaFormat;
use crate::time::{Duration, HostTime};
use crate::timer::TimerHandle;
use crate::viewport::{Layout, TouchProbe};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a carousel is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountEvent {
    /// Host time of the mount.
    pub at: HostTime,
    /// Number of items handed in.
    pub item_count: usize,
    /// Initial classification.
    pub layout: Layout,
}

/// Emitted when a carousel is torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmountEvent {
    /// Host time of the teardown.
    pub at: HostTime,
}

/// Emitted once per mount when the touch probe chain has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchProbeEvent {
    /// Host time of the probe.
    pub at: HostTime,
    /// The probe that decided.
    pub probe: TouchProbe,
    /// Its answer.
    pub capable: bool,
}

/// Emitted when the classification differs from the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutChangeEvent {
    /// Host time of the change.
    pub at: HostTime,
    /// Classification before the change.
    pub previous: Layout,
    /// Classification after the change.
    pub layout: Layout,
}

/// Emitted when an autoplay interval is armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayStartEvent {
    /// Host time of the start.
    pub at: HostTime,
    /// Handle of the new interval.
    pub handle: TimerHandle,
    /// Interval period.
    pub period: Duration,
}

/// Emitted when the autoplay interval is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayStopEvent {
    /// Host time of the stop.
    pub at: HostTime,
    /// Handle of the retired interval.
    pub handle: TimerHandle,
    /// Why it was cleared.
    pub reason: StopReason,
}

/// Emitted when a tick moves the active index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceEvent {
    /// Host time of the tick.
    pub at: HostTime,
    /// Index before the tick.
    pub from: Option<usize>,
    /// Index after the tick.
    pub to: usize,
}

/// Emitted when a tick arrives for a handle that is no longer live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaleTickEvent {
    /// Host time of the tick.
    pub at: HostTime,
    /// The retired handle.
    pub handle: TimerHandle,
}

/// Emitted when the user picks an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectEvent {
    /// Host time of the click.
    pub at: HostTime,
    /// Picked index.
    pub index: usize,
}

/// Emitted when media for an item resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaResolvedEvent {
    /// Item index.
    pub index: usize,
    /// Resolved format, or `None` when the item has no media.
    pub format: Option<MediaFormat>,
}

/// Emitted when media for an item has an unsupported extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaRejectedEvent<'a> {
    /// Item index.
    pub index: usize,
    /// The offending extension.
    pub extension: &'a str,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a carousel is mounted.
    fn on_mount(&mut self, e: &MountEvent) {
        _ = e;
    }

    /// Called after a carousel is torn down.
    fn on_unmount(&mut self, e: &UnmountEvent) {
        _ = e;
    }

    /// Called when touch capability has been probed.
    fn on_touch_probe(&mut self, e: &TouchProbeEvent) {
        _ = e;
    }

    /// Called when the layout classification changes.
    fn on_layout_change(&mut self, e: &LayoutChangeEvent) {
        _ = e;
    }

    /// Called when an autoplay interval is armed.
    fn on_autoplay_start(&mut self, e: &AutoplayStartEvent) {
        _ = e;
    }

    /// Called when the autoplay interval is cleared.
    fn on_autoplay_stop(&mut self, e: &AutoplayStopEvent) {
        _ = e;
    }

    /// Called when a tick moves the active index.
    fn on_advance(&mut self, e: &AdvanceEvent) {
        _ = e;
    }

    /// Called when a tick for a retired handle is dropped.
    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        _ = e;
    }

    /// Called when the user picks an item.
    fn on_select(&mut self, e: &SelectEvent) {
        _ = e;
    }

    /// Called when media resolves.
    fn on_media_resolved(&mut self, e: &MediaResolvedEvent) {
        _ = e;
    }

    /// Called when media is rejected.
    fn on_media_rejected(&mut self, e: &MediaRejectedEvent<'_>) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink and fan-out
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn on_mount(&mut self, e: &MountEvent) {
        (**self).on_mount(e);
    }
    fn on_unmount(&mut self, e: &UnmountEvent) {
        (**self).on_unmount(e);
    }
    fn on_touch_probe(&mut self, e: &TouchProbeEvent) {
        (**self).on_touch_probe(e);
    }
    fn on_layout_change(&mut self, e: &LayoutChangeEvent) {
        (**self).on_layout_change(e);
    }
    fn on_autoplay_start(&mut self, e: &AutoplayStartEvent) {
        (**self).on_autoplay_start(e);
    }
    fn on_autoplay_stop(&mut self, e: &AutoplayStopEvent) {
        (**self).on_autoplay_stop(e);
    }
    fn on_advance(&mut self, e: &AdvanceEvent) {
        (**self).on_advance(e);
    }
    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        (**self).on_stale_tick(e);
    }
    fn on_select(&mut self, e: &SelectEvent) {
        (**self).on_select(e);
    }
    fn on_media_resolved(&mut self, e: &MediaResolvedEvent) {
        (**self).on_media_resolved(e);
    }
    fn on_media_rejected(&mut self, e: &MediaRejectedEvent<'_>) {
        (**self).on_media_rejected(e);
    }
}

/// Forwards every event to both sinks, first `A` then `B`.
impl<A: TraceSink, B: TraceSink> TraceSink for (A, B) {
    fn on_mount(&mut self, e: &MountEvent) {
        self.0.on_mount(e);
        self.1.on_mount(e);
    }
    fn on_unmount(&mut self, e: &UnmountEvent) {
        self.0.on_unmount(e);
        self.1.on_unmount(e);
    }
    fn on_touch_probe(&mut self, e: &TouchProbeEvent) {
        self.0.on_touch_probe(e);
        self.1.on_touch_probe(e);
    }
    fn on_layout_change(&mut self, e: &LayoutChangeEvent) {
        self.0.on_layout_change(e);
        self.1.on_layout_change(e);
    }
    fn on_autoplay_start(&mut self, e: &AutoplayStartEvent) {
        self.0.on_autoplay_start(e);
        self.1.on_autoplay_start(e);
    }
    fn on_autoplay_stop(&mut self, e: &AutoplayStopEvent) {
        self.0.on_autoplay_stop(e);
        self.1.on_autoplay_stop(e);
    }
    fn on_advance(&mut self, e: &AdvanceEvent) {
        self.0.on_advance(e);
        self.1.on_advance(e);
    }
    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        self.0.on_stale_tick(e);
        self.1.on_stale_tick(e);
    }
    fn on_select(&mut self, e: &SelectEvent) {
        self.0.on_select(e);
        self.1.on_select(e);
    }
    fn on_media_resolved(&mut self, e: &MediaResolvedEvent) {
        self.0.on_media_resolved(e);
        self.1.on_media_resolved(e);
    }
    fn on_media_rejected(&mut self, e: &MediaRejectedEvent<'_>) {
        self.0.on_media_rejected(e);
        self.1.on_media_rejected(e);
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards one event type.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $hook:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$hook(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`MountEvent`].
        mount => on_mount(MountEvent)
    );
    forward!(
        /// Emits an [`UnmountEvent`].
        unmount => on_unmount(UnmountEvent)
    );
    forward!(
        /// Emits a [`TouchProbeEvent`].
        touch_probe => on_touch_probe(TouchProbeEvent)
    );
    forward!(
        /// Emits a [`LayoutChangeEvent`].
        layout_change => on_layout_change(LayoutChangeEvent)
    );
    forward!(
        /// Emits an [`AutoplayStartEvent`].
        autoplay_start => on_autoplay_start(AutoplayStartEvent)
    );
    forward!(
        /// Emits an [`AutoplayStopEvent`].
        autoplay_stop => on_autoplay_stop(AutoplayStopEvent)
    );
    forward!(
        /// Emits an [`AdvanceEvent`].
        advance => on_advance(AdvanceEvent)
    );
    forward!(
        /// Emits a [`StaleTickEvent`].
        stale_tick => on_stale_tick(StaleTickEvent)
    );
    forward!(
        /// Emits a [`SelectEvent`].
        select => on_select(SelectEvent)
    );
    forward!(
        /// Emits a [`MediaResolvedEvent`].
        media_resolved => on_media_resolved(MediaResolvedEvent)
    );
    forward!(
        /// Emits a [`MediaRejectedEvent`].
        media_rejected => on_media_rejected(MediaRejectedEvent<'_>)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_advance() -> AdvanceEvent {
        AdvanceEvent {
            at: HostTime(6000),
            from: Some(0),
            to: 1,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_advance(&sample_advance());
        sink.on_media_rejected(&MediaRejectedEvent {
            index: 0,
            extension: "mov",
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.advance(&sample_advance());
        tracer.stale_tick(&StaleTickEvent {
            at: HostTime(0),
            handle: TimerHandle(3),
        });
    }

    #[derive(Default)]
    struct CountingSink {
        advances: u32,
    }

    impl TraceSink for CountingSink {
        fn on_advance(&mut self, _e: &AdvanceEvent) {
            self.advances += 1;
        }
    }

    #[test]
    fn pair_fans_out_to_both_sinks() {
        let mut pair = (CountingSink::default(), CountingSink::default());
        pair.on_advance(&sample_advance());
        pair.on_select(&SelectEvent {
            at: HostTime(1),
            index: 0,
        });
        assert_eq!(pair.0.advances, 1);
        assert_eq!(pair.1.advances, 1);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = CountingSink::default();
        let mut tracer = Tracer::new(&mut sink);
        tracer.advance(&sample_advance());
        tracer.advance(&sample_advance());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.advances, 2);
    }
}
