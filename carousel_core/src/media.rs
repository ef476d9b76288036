// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media selection for the active item.
//!
//! [`resolve`] picks the touch or primary asset of an item, maps its file
//! extension onto a [`MediaFormat`] and returns a [`RenderableMedia`]
//! describing the element the host should place. Extensions outside the
//! supported set fail with [`UnsupportedMediaFormat`] so that a mistyped
//! asset surfaces as an error instead of an empty pane.

use alloc::string::{String, ToString as _};
use core::fmt;

use kurbo::Size;

use crate::item::{CarouselItem, MediaSource};
use crate::viewport::Layout;

/// Size reserved for still images before they load.
///
/// The displayed size is controlled by the host's layout; these dimensions
/// only need to be non-zero so the image element can reserve space.
pub const IMAGE_PLACEHOLDER_SIZE: Size = Size::new(1200.0, 800.0);

/// Text shown by browsers that cannot play the video.
pub const VIDEO_FALLBACK_TEXT: &str = "There was an issue displaying the video.";

/// A supported media file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    /// Animated or still GIF, shown as an image.
    Gif,
    /// MPEG-4 video.
    Mp4,
    /// WebM video.
    Webm,
}

impl MediaFormat {
    /// Maps a file extension onto a format.
    ///
    /// Matching is exact: `"MP4"` is not `"mp4"`.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "gif" => Some(Self::Gif),
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    /// Returns the canonical file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    /// Returns the MIME type.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Mp4 => "video/mp4",
            Self::Webm => "video/webm",
        }
    }

    /// Returns whether the format is played as video.
    #[must_use]
    pub const fn is_video(self) -> bool {
        matches!(self, Self::Mp4 | Self::Webm)
    }
}

/// A still image.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageMedia {
    /// Asset URL.
    pub url: String,
    /// Space reserved before the image loads.
    pub placeholder: Size,
}

/// The `preload` hint of a video element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preload {
    /// Fetch nothing up front.
    None,
    /// Fetch dimensions and duration only.
    Metadata,
    /// Fetch the whole file.
    Auto,
}

impl Preload {
    /// Returns the attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Metadata => "metadata",
            Self::Auto => "auto",
        }
    }
}

/// A looping, muted, inline video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoMedia {
    /// Asset URL, used as the single `<source>`.
    pub url: String,
    /// Container format; decides the `<source>` MIME type.
    pub format: MediaFormat,
    /// Start playing without interaction.
    pub autoplay: bool,
    /// Start without sound.
    pub muted: bool,
    /// Play inline rather than fullscreen on phones.
    pub plays_inline: bool,
    /// Restart at the end.
    pub looping: bool,
    /// Preload hint.
    pub preload: Preload,
}

impl VideoMedia {
    /// Creates the ambient background-style video used by the carousel.
    #[must_use]
    pub fn ambient(url: impl Into<String>, format: MediaFormat) -> Self {
        Self {
            url: url.into(),
            format,
            autoplay: true,
            muted: true,
            plays_inline: true,
            looping: true,
            preload: Preload::Metadata,
        }
    }

    /// Returns the `<source>` MIME type.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// What to display for an item.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderableMedia {
    /// The item has no media.
    None,
    /// A still image.
    Image(ImageMedia),
    /// A video.
    Video(VideoMedia),
}

impl RenderableMedia {
    /// Returns the format, or `None` for [`RenderableMedia::None`].
    #[must_use]
    pub fn format(&self) -> Option<MediaFormat> {
        match self {
            Self::None => None,
            Self::Image(_) => Some(MediaFormat::Gif),
            Self::Video(v) => Some(v.format),
        }
    }

    /// Returns the asset URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Image(i) => Some(&i.url),
            Self::Video(v) => Some(&v.url),
        }
    }
}

/// An item's media uses a file extension the carousel cannot display.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsupportedMediaFormat {
    /// The offending extension.
    pub extension: String,
    /// The URL it was taken from.
    pub url: String,
}

impl fmt::Display for UnsupportedMediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported media format: {} (from {})",
            self.extension, self.url
        )
    }
}

impl core::error::Error for UnsupportedMediaFormat {}

/// Returns the text after the last `.` of `url`, or all of `url` if it has
/// no `.`.
#[must_use]
pub fn file_extension(url: &str) -> &str {
    url.rsplit('.').next().unwrap_or(url)
}

/// Picks the asset URL for the given layout.
///
/// Touch devices get the touch asset when one exists.
#[must_use]
pub fn select_url(source: &MediaSource, layout: Layout) -> &str {
    match (&source.touch_url, layout.is_touch_capable) {
        (Some(touch), true) => touch,
        _ => &source.primary_url,
    }
}

/// Resolves what to display for `item` under `layout`.
///
/// # Errors
///
/// Returns [`UnsupportedMediaFormat`] when the selected asset's extension is
/// not `gif`, `mp4` or `webm`.
pub fn resolve(
    item: &CarouselItem,
    layout: Layout,
) -> Result<RenderableMedia, UnsupportedMediaFormat> {
    let Some(source) = &item.media else {
        return Ok(RenderableMedia::None);
    };
    let url = select_url(source, layout);
    let extension = file_extension(url);
    match MediaFormat::from_extension(extension) {
        Some(MediaFormat::Gif) => Ok(RenderableMedia::Image(ImageMedia {
            url: url.to_string(),
            placeholder: IMAGE_PLACEHOLDER_SIZE,
        })),
        Some(format) => Ok(RenderableMedia::Video(VideoMedia::ambient(url, format))),
        None => Err(UnsupportedMediaFormat {
            extension: extension.to_string(),
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    const DESKTOP: Layout = Layout {
        is_large_layout: true,
        is_touch_capable: false,
    };
    const TABLET: Layout = Layout {
        is_large_layout: true,
        is_touch_capable: true,
    };

    fn item(url: &str) -> CarouselItem {
        CarouselItem::new("Feature").with_media(MediaSource::new(url))
    }

    #[test]
    fn extensions_map_to_kinds() {
        let mp4 = resolve(&item("clip.mp4"), DESKTOP).unwrap();
        let RenderableMedia::Video(v) = mp4 else {
            panic!("mp4 should be video, got {mp4:?}");
        };
        assert_eq!(v.mime_type(), "video/mp4");

        let webm = resolve(&item("clip.webm"), DESKTOP).unwrap();
        assert_eq!(webm.format(), Some(MediaFormat::Webm));

        let gif = resolve(&item("clip.gif"), DESKTOP).unwrap();
        assert!(matches!(gif, RenderableMedia::Image(_)), "got {gif:?}");

        let err = resolve(&item("clip.mov"), DESKTOP).unwrap_err();
        assert_eq!(err.extension, "mov");
        assert_eq!(err.url, "clip.mov");
    }

    #[test]
    fn video_attributes_are_ambient() {
        let RenderableMedia::Video(v) = resolve(&item("/media/tour.webm"), DESKTOP).unwrap() else {
            panic!("expected video");
        };
        assert!(v.autoplay && v.muted && v.plays_inline && v.looping);
        assert_eq!(v.preload, Preload::Metadata);
        assert_eq!(v.preload.as_str(), "metadata");
        assert_eq!(v.mime_type(), "video/webm");
    }

    #[test]
    fn gif_reserves_non_zero_space() {
        let RenderableMedia::Image(img) = resolve(&item("a/b.c/demo.gif"), DESKTOP).unwrap() else {
            panic!("expected image");
        };
        assert_eq!(img.placeholder, Size::new(1200.0, 800.0));
        assert_eq!(img.url, "a/b.c/demo.gif");
    }

    #[test]
    fn touch_asset_only_for_touch_layouts() {
        let both = CarouselItem::new("x").with_media(
            MediaSource::new("desktop.mp4").with_touch_url("phone.webm"),
        );
        assert_eq!(resolve(&both, TABLET).unwrap().url(), Some("phone.webm"));
        assert_eq!(resolve(&both, DESKTOP).unwrap().url(), Some("desktop.mp4"));

        let primary_only = item("desktop.mp4");
        assert_eq!(
            resolve(&primary_only, TABLET).unwrap().url(),
            Some("desktop.mp4")
        );
    }

    #[test]
    fn missing_media_is_not_an_error() {
        assert_eq!(
            resolve(&CarouselItem::new("plain"), DESKTOP),
            Ok(RenderableMedia::None)
        );
    }

    #[test]
    fn extension_edge_cases() {
        assert_eq!(file_extension("noextension"), "noextension");
        assert_eq!(file_extension("clip.mp4?v=2"), "mp4?v=2");
        assert_eq!(file_extension("trailing."), "");

        let upper = resolve(&item("CLIP.MP4"), DESKTOP).unwrap_err();
        assert_eq!(upper.extension, "MP4", "matching is case-sensitive");
    }

    #[test]
    fn resolve_is_deterministic() {
        let subjects = [item("a.gif"), item("b.mp4"), item("c.avi")];
        for subject in &subjects {
            for layout in [DESKTOP, TABLET] {
                assert_eq!(resolve(subject, layout), resolve(subject, layout));
            }
        }
    }

    #[test]
    fn error_message_names_the_extension() {
        let err = resolve(&item("promo.mov"), DESKTOP).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported media format: mov (from promo.mov)"
        );
    }
}
