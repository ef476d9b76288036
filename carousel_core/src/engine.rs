// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mounted carousel.
//!
//! [`Carousel`] ties one [`ViewportClassifier`], one [`Autoplay`] and the
//! item list to an injected [`Environment`] and [`Timer`]. Hosts call into it
//! from three kinds of callbacks (breakpoint changes, interval firings and
//! clicks) and ask it to [`render`](Carousel::render) afterwards.
//!
//! Teardown is explicit via [`unmount`](Carousel::unmount) and also happens
//! on drop. After teardown every callback is ignored.

use alloc::vec::Vec;
use core::fmt;

use crate::autoplay::{Autoplay, AutoplayConfig, StopReason, Tick, TimerChange};
use crate::backend::{Frame, Presenter};
use crate::item::CarouselItem;
use crate::media::{RenderableMedia, UnsupportedMediaFormat, resolve};
use crate::trace::{
    AdvanceEvent, AutoplayStartEvent, AutoplayStopEvent, LayoutChangeEvent, MediaRejectedEvent,
    MediaResolvedEvent, MountEvent, NoopSink, SelectEvent, StaleTickEvent, TouchProbeEvent,
    TraceSink, Tracer, UnmountEvent,
};
use crate::timer::{Timer, TimerHandle};
use crate::viewport::{Breakpoint, Environment, Layout, ViewportClassifier};

/// Snapshot of the observable state of a [`Carousel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CarouselState {
    /// Highlighted item, if any.
    pub active_index: Option<usize>,
    /// A user selection has latched autoplay off.
    pub is_user_override: bool,
    /// An autoplay interval is armed.
    pub is_autoplaying: bool,
    /// Current classification.
    pub layout: Layout,
}

/// Errors returned by [`Carousel::select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarouselError {
    /// The index does not name an item.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of items.
        len: usize,
    },
    /// The carousel has been torn down.
    Unmounted,
}

impl fmt::Display for CarouselError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "item index {index} out of range for {len} items")
            }
            Self::Unmounted => write!(f, "carousel is unmounted"),
        }
    }
}

impl core::error::Error for CarouselError {}

/// One mounted feature carousel.
///
/// `E` supplies viewport and pointer signals, `T` the clock and interval,
/// `S` receives trace events.
pub struct Carousel<E: Environment, T: Timer, S: TraceSink = NoopSink> {
    items: Vec<CarouselItem>,
    env: E,
    timer: T,
    sink: S,
    classifier: ViewportClassifier,
    layout: Layout,
    autoplay: Autoplay,
    mounted: bool,
}

impl<E: Environment, T: Timer, S: TraceSink> fmt::Debug for Carousel<E, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("items", &self.items.len())
            .field("layout", &self.layout)
            .field("autoplay", &self.autoplay)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<E: Environment, T: Timer> Carousel<E, T> {
    /// Mounts a carousel with the default six-second interval and no tracing.
    #[must_use]
    pub fn mount(items: Vec<CarouselItem>, env: E, timer: T) -> Self {
        Self::mount_with_sink(items, env, timer, AutoplayConfig::default(), NoopSink)
    }

    /// Mounts a carousel with a custom configuration and no tracing.
    #[must_use]
    pub fn mount_with_config(
        items: Vec<CarouselItem>,
        env: E,
        timer: T,
        config: AutoplayConfig,
    ) -> Self {
        Self::mount_with_sink(items, env, timer, config, NoopSink)
    }
}

impl<E: Environment, T: Timer, S: TraceSink> Carousel<E, T, S> {
    /// Mounts a carousel that reports to `sink`.
    ///
    /// Registers both breakpoint listeners, classifies the viewport and, on a
    /// large layout with items, highlights the first item and starts
    /// autoplay.
    #[must_use]
    pub fn mount_with_sink(
        items: Vec<CarouselItem>,
        env: E,
        timer: T,
        config: AutoplayConfig,
        sink: S,
    ) -> Self {
        let mut this = Self {
            items,
            env,
            timer,
            sink,
            classifier: ViewportClassifier::new(),
            layout: Layout::default(),
            autoplay: Autoplay::new(config),
            mounted: true,
        };

        for breakpoint in Breakpoint::ALL {
            this.env.watch_breakpoint(breakpoint);
        }
        this.layout = this.classifier.classify(&this.env);

        let at = this.timer.now();
        if let Some(touch) = this.classifier.touch_detection() {
            Tracer::new(&mut this.sink).touch_probe(&TouchProbeEvent {
                at,
                probe: touch.probe,
                capable: touch.capable,
            });
        }
        Tracer::new(&mut this.sink).mount(&MountEvent {
            at,
            item_count: this.items.len(),
            layout: this.layout,
        });

        if this.layout.is_large_layout {
            this.autoplay.seed_index(Some(0), this.items.len());
        }
        let change = this
            .autoplay
            .start(&mut this.timer, this.items.len(), this.layout);
        this.trace_timer_change(change);
        this
    }

    /// Returns the item list.
    #[must_use]
    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    /// Returns the highlighted item, if any.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.autoplay.active_index()
    }

    /// Returns the current classification.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns whether an autoplay interval is armed.
    #[must_use]
    pub const fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Returns whether a user selection has latched autoplay off.
    #[must_use]
    pub const fn is_user_override(&self) -> bool {
        self.autoplay.is_user_override()
    }

    /// Returns whether the host has paused autoplay.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.autoplay.is_paused()
    }

    /// Returns whether the carousel is still mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns the live interval handle, if any.
    #[must_use]
    pub const fn timer_handle(&self) -> Option<TimerHandle> {
        self.autoplay.handle()
    }

    /// Returns a snapshot of the observable state.
    #[must_use]
    pub const fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.autoplay.active_index(),
            is_user_override: self.autoplay.is_user_override(),
            is_autoplaying: self.autoplay.is_running(),
            layout: self.layout,
        }
    }

    /// Returns the trace sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Re-reads the viewport after a breakpoint notification.
    ///
    /// Returns the new classification.
    pub fn on_viewport_change(&mut self) -> Layout {
        if !self.mounted {
            return self.layout;
        }
        let previous = self.layout;
        self.layout = self.classifier.classify(&self.env);
        if previous != self.layout {
            let at = self.timer.now();
            Tracer::new(&mut self.sink).layout_change(&LayoutChangeEvent {
                at,
                previous,
                layout: self.layout,
            });
        }
        let change = self
            .autoplay
            .on_layout_change(&mut self.timer, self.items.len(), self.layout);
        self.trace_timer_change(change);
        self.layout
    }

    /// Delivers one firing of the interval identified by `handle`.
    ///
    /// Returns the new active index, or `None` when the handle is not the
    /// live one (the firing was queued before a stop) or the carousel is
    /// unmounted.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<usize> {
        if !self.mounted {
            return None;
        }
        let at = self.timer.now();
        match self.autoplay.on_tick(handle, self.items.len()) {
            Tick::Advanced { from, to } => {
                Tracer::new(&mut self.sink).advance(&AdvanceEvent { at, from, to });
                Some(to)
            }
            Tick::Stale => {
                Tracer::new(&mut self.sink).stale_tick(&StaleTickEvent { at, handle });
                None
            }
        }
    }

    /// Handles a click on the item at `index`.
    ///
    /// Highlights it (on large layouts) and stops autoplay for the rest of
    /// this mount.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::IndexOutOfRange`] for an index past the end
    /// and [`CarouselError::Unmounted`] after teardown; state is unchanged
    /// in both cases.
    pub fn select(&mut self, index: usize) -> Result<(), CarouselError> {
        if !self.mounted {
            return Err(CarouselError::Unmounted);
        }
        let len = self.items.len();
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }
        let at = self.timer.now();
        Tracer::new(&mut self.sink).select(&SelectEvent { at, index });
        let change = self
            .autoplay
            .on_user_select(&mut self.timer, index, self.layout);
        self.trace_timer_change(change);
        Ok(())
    }

    /// Replaces the item list.
    ///
    /// Ignored after teardown.
    pub fn set_items(&mut self, items: Vec<CarouselItem>) {
        if !self.mounted {
            return;
        }
        self.items = items;
        let change = self
            .autoplay
            .on_items_change(&mut self.timer, self.items.len(), self.layout);
        self.trace_timer_change(change);
    }

    /// Suppresses autoplay until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        if !self.mounted {
            return;
        }
        let change = self.autoplay.pause(&mut self.timer);
        self.trace_timer_change(change);
    }

    /// Lifts a [`pause`](Self::pause).
    ///
    /// Autoplay restarts only if it would otherwise be allowed.
    pub fn resume(&mut self) {
        if !self.mounted {
            return;
        }
        let change = self
            .autoplay
            .resume(&mut self.timer, self.items.len(), self.layout);
        self.trace_timer_change(change);
    }

    /// Resolves what to display for the item at `index`.
    ///
    /// `None` or an index without an item resolves to
    /// [`RenderableMedia::None`].
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedMediaFormat`] when the item's asset cannot be
    /// displayed.
    pub fn resolve_media(
        &mut self,
        index: Option<usize>,
    ) -> Result<RenderableMedia, UnsupportedMediaFormat> {
        let Some((index, item)) = index.and_then(|i| self.items.get(i).map(|item| (i, item)))
        else {
            return Ok(RenderableMedia::None);
        };
        match resolve(item, self.layout) {
            Ok(media) => {
                self.tracer().media_resolved(&MediaResolvedEvent {
                    index,
                    format: media.format(),
                });
                Ok(media)
            }
            Err(err) => {
                self.tracer().media_rejected(&MediaRejectedEvent {
                    index,
                    extension: &err.extension,
                });
                Err(err)
            }
        }
    }

    /// Resolves the active item's media.
    ///
    /// # Errors
    ///
    /// See [`resolve_media`](Self::resolve_media).
    pub fn active_media(&mut self) -> Result<RenderableMedia, UnsupportedMediaFormat> {
        self.resolve_media(self.active_index())
    }

    /// Hands the current state to `presenter`.
    ///
    /// On large layouts only the active item's media is resolved; below the
    /// breakpoint every item shows its own media inline, so all of them are.
    /// Nothing is presented after teardown.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedMediaFormat`] before presenting anything when a
    /// displayed asset cannot be shown.
    pub fn render<P: Presenter + ?Sized>(
        &mut self,
        presenter: &mut P,
    ) -> Result<(), UnsupportedMediaFormat> {
        if !self.mounted {
            return Ok(());
        }
        let active_media = self.active_media()?;
        let inline_media = if self.layout.is_large_layout {
            Vec::new()
        } else {
            (0..self.items.len())
                .map(|i| self.resolve_media(Some(i)))
                .collect::<Result<Vec<_>, _>>()?
        };
        presenter.present(&Frame {
            items: &self.items,
            active_index: self.active_index(),
            layout: self.layout,
            active_media: &active_media,
            inline_media: &inline_media,
        });
        Ok(())
    }

    /// Stops autoplay and detaches the breakpoint listeners.
    ///
    /// Idempotent. Runs automatically on drop.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let change = self.autoplay.stop(&mut self.timer, StopReason::Unmounted);
        self.trace_timer_change(change);
        for breakpoint in Breakpoint::ALL {
            self.env.unwatch_breakpoint(breakpoint);
        }
        self.mounted = false;
        let at = self.timer.now();
        Tracer::new(&mut self.sink).unmount(&UnmountEvent { at });
    }

    // Media can still be resolved after teardown, but it is no longer traced.
    fn tracer(&mut self) -> Tracer<'_> {
        if self.mounted {
            Tracer::new(&mut self.sink)
        } else {
            Tracer::none()
        }
    }

    fn trace_timer_change(&mut self, change: TimerChange) {
        let at = self.timer.now();
        match change {
            TimerChange::Unchanged => {}
            TimerChange::Started(handle) => {
                Tracer::new(&mut self.sink).autoplay_start(&AutoplayStartEvent {
                    at,
                    handle,
                    period: self.autoplay.config().interval,
                });
            }
            TimerChange::Stopped(handle, reason) => {
                Tracer::new(&mut self.sink).autoplay_stop(&AutoplayStopEvent {
                    at,
                    handle,
                    reason,
                });
            }
        }
    }
}

impl<E: Environment, T: Timer, S: TraceSink> Drop for Carousel<E, T, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::item::MediaSource;
    use crate::media::MediaFormat;
    use crate::time::{Duration, HostTime};

    #[derive(Default)]
    struct Shared {
        width: Cell<u32>,
        watched: Cell<u32>,
        armed: RefCell<Vec<TimerHandle>>,
        next_id: Cell<i32>,
    }

    struct Env(Rc<Shared>);

    impl Environment for Env {
        fn viewport_width(&self) -> u32 {
            self.0.width.get()
        }
        fn max_touch_points(&self) -> Option<u32> {
            Some(0)
        }
        fn coarse_pointer(&self) -> Option<bool> {
            None
        }
        fn has_orientation(&self) -> bool {
            false
        }
        fn user_agent(&self) -> Option<String> {
            None
        }
        fn watch_breakpoint(&mut self, _breakpoint: Breakpoint) {
            self.0.watched.set(self.0.watched.get() + 1);
        }
        fn unwatch_breakpoint(&mut self, _breakpoint: Breakpoint) {
            self.0.watched.set(self.0.watched.get() - 1);
        }
    }

    struct Clock(Rc<Shared>);

    impl Timer for Clock {
        fn now(&self) -> HostTime {
            HostTime::ZERO
        }
        fn set_interval(&mut self, _period: Duration) -> TimerHandle {
            let id = self.0.next_id.get() + 1;
            self.0.next_id.set(id);
            self.0.armed.borrow_mut().push(TimerHandle(id));
            TimerHandle(id)
        }
        fn clear_interval(&mut self, handle: TimerHandle) {
            self.0.armed.borrow_mut().retain(|&h| h != handle);
        }
    }

    fn items(n: usize) -> Vec<CarouselItem> {
        (0..n)
            .map(|i| {
                CarouselItem::new(alloc::format!("Item {i}"))
                    .with_media(MediaSource::new(alloc::format!("/media/{i}.mp4")))
            })
            .collect()
    }

    fn mount(width: u32, n: usize) -> (Rc<Shared>, Carousel<Env, Clock>) {
        let shared = Rc::new(Shared::default());
        shared.width.set(width);
        let carousel = Carousel::mount(items(n), Env(shared.clone()), Clock(shared.clone()));
        (shared, carousel)
    }

    fn live(shared: &Shared) -> TimerHandle {
        let armed = shared.armed.borrow();
        assert_eq!(armed.len(), 1, "exactly one live interval");
        armed[0]
    }

    #[test]
    fn mount_on_large_layout_highlights_first_item_and_autoplays() {
        let (shared, carousel) = mount(1280, 3);
        assert_eq!(
            carousel.state(),
            CarouselState {
                active_index: Some(0),
                is_user_override: false,
                is_autoplaying: true,
                layout: Layout {
                    is_large_layout: true,
                    is_touch_capable: false,
                },
            }
        );
        assert_eq!(shared.watched.get(), 2, "both breakpoints watched");
    }

    #[test]
    fn mount_on_small_layout_stays_idle() {
        let (shared, carousel) = mount(800, 3);
        assert_eq!(carousel.active_index(), None);
        assert!(!carousel.is_autoplaying());
        assert!(shared.armed.borrow().is_empty());
    }

    #[test]
    fn ticks_cycle_and_wrap() {
        let (shared, mut carousel) = mount(1280, 3);
        let handle = live(&shared);
        assert_eq!(carousel.on_timer(handle), Some(1));
        assert_eq!(carousel.on_timer(handle), Some(2));
        assert_eq!(carousel.on_timer(handle), Some(0));
    }

    #[test]
    fn select_latches_override_across_layout_changes() {
        let (shared, mut carousel) = mount(1280, 3);
        let old = live(&shared);
        carousel.select(1).unwrap();
        assert_eq!(carousel.active_index(), Some(1));
        assert!(carousel.is_user_override());
        assert!(shared.armed.borrow().is_empty());
        assert_eq!(carousel.on_timer(old), None, "queued firing is stale");

        shared.width.set(600);
        carousel.on_viewport_change();
        assert_eq!(carousel.active_index(), None);
        shared.width.set(1400);
        carousel.on_viewport_change();
        assert!(!carousel.is_autoplaying(), "override survives the round trip");
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let (_shared, mut carousel) = mount(1280, 2);
        assert_eq!(
            carousel.select(2),
            Err(CarouselError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(carousel.is_autoplaying(), "state untouched");
    }

    #[test]
    fn growing_past_breakpoint_starts_autoplay_from_no_index() {
        let (shared, mut carousel) = mount(900, 3);
        shared.width.set(1100);
        carousel.on_viewport_change();
        let handle = live(&shared);
        assert_eq!(carousel.active_index(), None);
        assert_eq!(carousel.on_timer(handle), Some(0));
    }

    #[test]
    fn unmount_releases_everything_and_is_idempotent() {
        let (shared, mut carousel) = mount(1280, 3);
        let handle = live(&shared);
        carousel.unmount();
        carousel.unmount();
        assert!(shared.armed.borrow().is_empty());
        assert_eq!(shared.watched.get(), 0);
        assert_eq!(carousel.on_timer(handle), None);
        assert_eq!(carousel.select(0), Err(CarouselError::Unmounted));
    }

    #[test]
    fn teardown_freezes_items_and_state() {
        let (_shared, mut carousel) = mount(1280, 2);
        carousel.unmount();
        let before = carousel.state();
        carousel.set_items(Vec::new());
        assert_eq!(carousel.items().len(), 2, "items kept after teardown");
        assert_eq!(carousel.state(), before);
        assert_eq!(carousel.active_index(), Some(0));

        struct Count(u32);
        impl Presenter for Count {
            fn present(&mut self, _frame: &Frame<'_>) {
                self.0 += 1;
            }
        }
        let mut count = Count(0);
        assert!(carousel.render(&mut count).is_ok());
        assert_eq!(count.0, 0, "nothing presented after teardown");
    }

    #[test]
    fn drop_unmounts() {
        let (shared, carousel) = mount(1280, 3);
        drop(carousel);
        assert!(shared.armed.borrow().is_empty());
        assert_eq!(shared.watched.get(), 0);
    }

    #[test]
    fn emptying_items_stops_autoplay() {
        let (shared, mut carousel) = mount(1280, 3);
        carousel.set_items(Vec::new());
        assert!(shared.armed.borrow().is_empty());
        assert_eq!(carousel.active_index(), None);
        carousel.set_items(items(2));
        assert!(carousel.is_autoplaying());
    }

    #[test]
    fn pause_and_resume() {
        let (shared, mut carousel) = mount(1280, 3);
        carousel.pause();
        assert!(shared.armed.borrow().is_empty());
        assert!(carousel.is_paused());
        carousel.resume();
        assert!(carousel.is_autoplaying());
        assert_eq!(carousel.active_index(), Some(0), "pause keeps the index");
    }

    #[test]
    fn render_hands_active_media_to_presenter() {
        struct Capture(Option<(Option<usize>, Option<MediaFormat>)>);
        impl Presenter for Capture {
            fn present(&mut self, frame: &Frame<'_>) {
                self.0 = Some((frame.active_index, frame.active_media.format()));
            }
        }

        let (_shared, mut carousel) = mount(1280, 3);
        let mut capture = Capture(None);
        carousel.render(&mut capture).unwrap();
        assert_eq!(capture.0, Some((Some(0), Some(MediaFormat::Mp4))));
    }

    #[test]
    fn render_fails_on_unsupported_media() {
        struct Never;
        impl Presenter for Never {
            fn present(&mut self, _frame: &Frame<'_>) {
                panic!("nothing should be presented");
            }
        }

        let (_shared, mut carousel) = mount(1280, 1);
        carousel.set_items(vec![
            CarouselItem::new("Broken").with_media(MediaSource::new("/media/poster.png")),
        ]);
        let err = carousel.render(&mut Never).unwrap_err();
        assert_eq!(err.extension, "png");
    }

    #[test]
    fn small_layout_render_checks_every_item() {
        struct Never;
        impl Presenter for Never {
            fn present(&mut self, _frame: &Frame<'_>) {
                panic!("nothing should be presented");
            }
        }

        let (_shared, mut carousel) = mount(640, 2);
        let mut list = items(2);
        list[1].media = Some(MediaSource::new("/media/clip.mov"));
        carousel.set_items(list);
        let err = carousel.render(&mut Never).unwrap_err();
        assert_eq!(err.extension, "mov", "inline item rejected");
    }
}
