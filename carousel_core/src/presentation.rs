// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item display rules.
//!
//! On large layouts the item list sits next to a media pane and only the
//! active item is expanded. Below the breakpoint there is no media pane:
//! every item shows its text and action and renders its own media inline.

use crate::item::CarouselItem;
use crate::viewport::Layout;

/// How the host should draw one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemPresentation {
    /// Draw the item with the active styling.
    pub highlighted: bool,
    /// Show the body text.
    pub show_text: bool,
    /// Show the call-to-action.
    pub show_action: bool,
    /// Render the item's media inside the item rather than in the pane.
    pub inline_media: bool,
}

/// Computes the presentation of the item at `index`.
#[must_use]
pub fn present(
    item: &CarouselItem,
    index: usize,
    active_index: Option<usize>,
    layout: Layout,
) -> ItemPresentation {
    let large = layout.is_large_layout;
    let highlighted = large && active_index == Some(index);
    let expanded = highlighted || !large;
    ItemPresentation {
        highlighted,
        show_text: expanded && item.text.is_some(),
        show_action: expanded && item.action.is_some(),
        inline_media: !large,
    }
}
