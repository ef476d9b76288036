// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel item records.
//!
//! Items are produced by the content layer and handed to the engine as an
//! ordered list. The engine never mutates them; it only reads the media
//! reference when resolving what to display.

use alloc::string::String;

/// A call-to-action attached to an item. Rendered by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRef {
    /// Button label.
    pub label: String,
    /// Link target.
    pub href: String,
}

/// Where an item's media lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSource {
    /// Asset shown by default.
    pub primary_url: String,
    /// Alternative asset for touch-capable devices, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub touch_url: Option<String>,
}

impl MediaSource {
    /// Creates a source with only a primary asset.
    #[must_use]
    pub fn new(primary_url: impl Into<String>) -> Self {
        Self {
            primary_url: primary_url.into(),
            touch_url: None,
        }
    }

    /// Sets the touch-device asset.
    #[must_use]
    pub fn with_touch_url(mut self, touch_url: impl Into<String>) -> Self {
        self.touch_url = Some(touch_url.into());
        self
    }
}

/// One entry of a feature carousel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselItem {
    /// Headline, always shown.
    pub headline: String,
    /// Body text, expanded when the item is highlighted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<String>,
    /// Optional call-to-action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub action: Option<ActionRef>,
    /// Key into the host's icon set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_key: Option<String>,
    /// Media shown while this item is active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub media: Option<MediaSource>,
}

impl CarouselItem {
    /// Creates an item with only a headline.
    #[must_use]
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            text: None,
            action: None,
            icon_key: None,
            media: None,
        }
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the call-to-action.
    #[must_use]
    pub fn with_action(mut self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.action = Some(ActionRef {
            label: label.into(),
            href: href.into(),
        });
        self
    }

    /// Sets the icon key.
    #[must_use]
    pub fn with_icon(mut self, icon_key: impl Into<String>) -> Self {
        self.icon_key = Some(icon_key.into());
        self
    }

    /// Sets the media source.
    #[must_use]
    pub fn with_media(mut self, media: MediaSource) -> Self {
        self.media = Some(media);
        self
    }
}
