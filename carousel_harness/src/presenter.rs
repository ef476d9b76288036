// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A presenter that keeps every frame it is given.

use alloc::vec::Vec;

use carousel_core::backend::{Frame, Presenter};
use carousel_core::media::RenderableMedia;
use carousel_core::presentation::ItemPresentation;
use carousel_core::viewport::Layout;

/// Owned copy of one presented [`Frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct PresentedFrame {
    /// Highlighted item.
    pub active_index: Option<usize>,
    /// Classification at present time.
    pub layout: Layout,
    /// Media placed in the large-layout pane.
    pub pane_media: RenderableMedia,
    /// Media rendered inside each item, in item order.
    pub inline_media: Vec<RenderableMedia>,
    /// Per-item presentation, in item order.
    pub items: Vec<ItemPresentation>,
}

/// Records frames instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    frames: Vec<PresentedFrame>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[PresentedFrame] {
        &self.frames
    }

    /// Returns the most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&PresentedFrame> {
        self.frames.last()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames.push(PresentedFrame {
            active_index: frame.active_index,
            layout: frame.layout,
            pane_media: if frame.shows_media_pane() {
                frame.active_media.clone()
            } else {
                RenderableMedia::None
            },
            inline_media: frame.inline_media.to_vec(),
            items: (0..frame.items.len())
                .map(|i| frame.presentation(i))
                .collect(),
        });
    }
}
