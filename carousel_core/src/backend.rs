// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The engine splits platform-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Environment** — Implements
//!   [`Environment`](crate::viewport::Environment): viewport width, pointer
//!   probes and breakpoint listener registration.
//!
//! - **Timer** — Implements [`Timer`](crate::timer::Timer): a monotonic
//!   `now()` and a repeating interval whose firings are delivered back to
//!   [`Carousel::on_timer`](crate::engine::Carousel::on_timer).
//!
//! - **Presenter** — Implements the [`Presenter`] trait to place the active
//!   item and its media into a platform-native tree (e.g. DOM elements).
//!
//! # Crate boundaries
//!
//! `carousel_core` owns the data model, classification, scheduling, media
//! resolution and this contract module. Backend crates depend on
//! `carousel_core` and provide platform glue. Application code depends on
//! both and wires them together.

use crate::item::CarouselItem;
use crate::media::RenderableMedia;
use crate::presentation::{ItemPresentation, present};
use crate::viewport::Layout;

/// Everything a presenter needs to draw the carousel once.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// The item list, in display order.
    pub items: &'a [CarouselItem],
    /// The highlighted item, if any.
    pub active_index: Option<usize>,
    /// Current classification.
    pub layout: Layout,
    /// Resolved media of the active item, shown in the large-layout pane.
    pub active_media: &'a RenderableMedia,
    /// Resolved media of every item, in item order, for inline rendering.
    ///
    /// Empty on large layouts, where only the pane shows media.
    pub inline_media: &'a [RenderableMedia],
}

impl Frame<'_> {
    /// Returns how the item at `index` should be drawn.
    ///
    /// Indices past the end yield the default (collapsed) presentation.
    #[must_use]
    pub fn presentation(&self, index: usize) -> ItemPresentation {
        self.items
            .get(index)
            .map(|item| present(item, index, self.active_index, self.layout))
            .unwrap_or_default()
    }

    /// Returns the inline media of the item at `index`, if it is shown.
    #[must_use]
    pub fn media_for(&self, index: usize) -> Option<&RenderableMedia> {
        self.inline_media.get(index)
    }

    /// Returns whether the separate media pane is shown.
    #[must_use]
    pub const fn shows_media_pane(&self) -> bool {
        self.layout.is_large_layout
    }
}

/// Places a [`Frame`] into a platform-native presentation tree.
///
/// Both DOM-based presenters and test doubles implement this trait.
///
/// # Event wiring pseudocode
///
/// ```rust,ignore
/// fn on_interval(handle: TimerHandle) {
///     if carousel.on_timer(handle).is_some() {
///         carousel.render(&mut presenter)?;
///     }
/// }
///
/// fn on_breakpoint_change() {
///     carousel.on_viewport_change();
///     carousel.render(&mut presenter)?;
/// }
/// ```
pub trait Presenter {
    /// Draws the given frame.
    fn present(&mut self, frame: &Frame<'_>);
}
