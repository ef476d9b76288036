// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic scenario driver for carousel tests and demos.
//!
//! [`Harness`] mounts a [`Carousel`] on a [`VirtualTimer`] and a
//! [`FakeEnvironment`], then lets the caller move virtual time, resize the
//! viewport and click items. Interval firings are delivered in time order
//! exactly like a browser event loop would, and only for intervals that are
//! still armed.

#![no_std]

extern crate alloc;

mod env;
mod presenter;
mod timer;

pub use env::{DeviceProfile, FakeEnvironment};
pub use presenter::{PresentedFrame, RecordingPresenter};
pub use timer::VirtualTimer;

use alloc::vec::Vec;
use core::fmt;

use carousel_core::autoplay::AutoplayConfig;
use carousel_core::backend::Presenter;
use carousel_core::engine::{Carousel, CarouselError};
use carousel_core::item::CarouselItem;
use carousel_core::media::UnsupportedMediaFormat;
use carousel_core::time::{Duration, HostTime};
use carousel_core::timer::{Timer, TimerHandle};
use carousel_core::trace::{NoopSink, TraceSink};
use carousel_core::viewport::Layout;

/// A mounted carousel on virtual time.
pub struct Harness<S: TraceSink = NoopSink> {
    carousel: Carousel<FakeEnvironment, VirtualTimer, S>,
    env: FakeEnvironment,
    timer: VirtualTimer,
    history: Vec<(HostTime, usize)>,
}

impl<S: TraceSink> fmt::Debug for Harness<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("carousel", &self.carousel)
            .field("now", &self.timer.now())
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Harness {
    /// Mounts `items` on a device described by `profile`.
    #[must_use]
    pub fn mount(items: Vec<CarouselItem>, profile: DeviceProfile) -> Self {
        Self::mount_with_sink(items, profile, AutoplayConfig::default(), NoopSink)
    }
}

impl<S: TraceSink> Harness<S> {
    /// Mounts `items` with a custom configuration and trace sink.
    #[must_use]
    pub fn mount_with_sink(
        items: Vec<CarouselItem>,
        profile: DeviceProfile,
        config: AutoplayConfig,
        sink: S,
    ) -> Self {
        let env = FakeEnvironment::new(profile);
        let timer = VirtualTimer::new();
        let carousel = Carousel::mount_with_sink(items, env.clone(), timer.clone(), config, sink);
        Self {
            carousel,
            env,
            timer,
            history: Vec::new(),
        }
    }

    /// Returns the virtual time.
    #[must_use]
    pub fn now(&self) -> HostTime {
        self.timer.now()
    }

    /// Runs every interval firing due within `by`, then moves the clock to
    /// the end of the window.
    ///
    /// Returns the indices the carousel advanced to, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<usize> {
        let deadline = self.timer.now() + by;
        let mut advanced = Vec::new();
        while let Some(handle) = self.timer.pop_due(deadline) {
            if let Some(index) = self.carousel.on_timer(handle) {
                self.history.push((self.timer.now(), index));
                advanced.push(index);
            }
        }
        self.timer.set_now(deadline);
        advanced
    }

    /// Resizes the viewport and notifies the carousel once per breakpoint
    /// listener whose query flipped.
    pub fn resize(&mut self, width: u32) -> Layout {
        for _ in self.env.set_width(width) {
            self.carousel.on_viewport_change();
        }
        self.carousel.layout()
    }

    /// Clicks the item at `index`.
    ///
    /// # Errors
    ///
    /// Propagates [`CarouselError`] from [`Carousel::select`].
    pub fn click(&mut self, index: usize) -> Result<(), CarouselError> {
        self.carousel.select(index)
    }

    /// Delivers a firing for `handle` directly, bypassing the interval queue.
    ///
    /// Simulates a callback that was already queued when its interval was
    /// cleared.
    pub fn deliver(&mut self, handle: TimerHandle) -> Option<usize> {
        self.carousel.on_timer(handle)
    }

    /// Tears the carousel down.
    pub fn unmount(&mut self) {
        self.carousel.unmount();
    }

    /// Renders into `presenter`.
    ///
    /// # Errors
    ///
    /// Propagates [`UnsupportedMediaFormat`] from [`Carousel::render`].
    pub fn render<P: Presenter + ?Sized>(
        &mut self,
        presenter: &mut P,
    ) -> Result<(), UnsupportedMediaFormat> {
        self.carousel.render(presenter)
    }

    /// Returns the highlighted item.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.carousel.active_index()
    }

    /// Returns how many intervals are armed.
    #[must_use]
    pub fn live_timers(&self) -> usize {
        self.timer.live_count()
    }

    /// Returns the armed interval handles.
    #[must_use]
    pub fn live_handles(&self) -> Vec<TimerHandle> {
        self.timer.live_handles()
    }

    /// Returns how many breakpoint listeners are registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.env.listener_count()
    }

    /// Returns every autoplay advance as `(time, index)`.
    #[must_use]
    pub fn history(&self) -> &[(HostTime, usize)] {
        &self.history
    }

    /// Returns the carousel.
    #[must_use]
    pub fn carousel(&self) -> &Carousel<FakeEnvironment, VirtualTimer, S> {
        &self.carousel
    }

    /// Returns the carousel mutably.
    pub fn carousel_mut(&mut self) -> &mut Carousel<FakeEnvironment, VirtualTimer, S> {
        &mut self.carousel
    }

    /// Returns the shared timer.
    #[must_use]
    pub fn timer(&self) -> &VirtualTimer {
        &self.timer
    }

    /// Returns the shared environment.
    #[must_use]
    pub fn env(&self) -> &FakeEnvironment {
        &self.env
    }
}
