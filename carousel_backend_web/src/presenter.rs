// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates a [`Frame`] into an item list and, on large layouts, a media
//! pane inside a container element.
//!
//! The item list is rebuilt on every frame. The pane is only rebuilt when the
//! active item or its asset changes, so a playing video is not restarted by an
//! unrelated re-render.

use alloc::format;
use alloc::string::{String, ToString as _};

use carousel_core::backend::{Frame, Presenter};
use carousel_core::item::CarouselItem;
use carousel_core::media::{ImageMedia, RenderableMedia, VIDEO_FALLBACK_TEXT, VideoMedia};
use carousel_core::presentation::ItemPresentation;
use wasm_bindgen::JsCast as _;
use web_sys::{
    Document, HtmlAnchorElement, HtmlElement, HtmlImageElement, HtmlSourceElement,
    HtmlVideoElement,
};

/// Attribute carrying an item's index, for click delegation.
pub const INDEX_ATTRIBUTE: &str = "data-carousel-index";

/// Renders carousel frames into a container element.
///
/// The presenter owns two children of the container: the item list and the
/// media pane. Item elements carry [`INDEX_ATTRIBUTE`] so the host can map a
/// click back to [`Carousel::select`](carousel_core::engine::Carousel::select).
pub struct DomPresenter {
    document: Document,
    list: HtmlElement,
    pane: HtmlElement,
    pane_key: Option<PaneKey>,
}

/// What the media pane currently shows: the active index and its asset URL.
type PaneKey = (usize, String);

fn pane_key(frame: &Frame<'_>) -> Option<PaneKey> {
    let index = frame.active_index?;
    let url = frame.active_media.url()?;
    Some((index, url.to_string()))
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("pane_key", &self.pane_key)
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter that renders into `container`.
    ///
    /// Returns `None` if the container is detached from a document.
    #[must_use]
    pub fn new(container: &HtmlElement) -> Option<Self> {
        let document = container.owner_document()?;
        let list = create(&document, "div")?;
        list.set_class_name("carousel-items");
        let pane = create(&document, "aside")?;
        pane.set_class_name("carousel-media");
        container.append_child(&list).ok()?;
        container.append_child(&pane).ok()?;
        Some(Self {
            document,
            list,
            pane,
            pane_key: None,
        })
    }

    fn render_item(
        &self,
        index: usize,
        item: &CarouselItem,
        presentation: ItemPresentation,
        media: Option<&RenderableMedia>,
    ) -> Option<HtmlElement> {
        let el = create(&self.document, "div")?;
        el.set_class_name(if presentation.highlighted {
            "carousel-item is-active"
        } else {
            "carousel-item"
        });
        let _ = el.set_attribute(INDEX_ATTRIBUTE, &index.to_string());
        if let Some(icon) = &item.icon_key {
            let _ = el.set_attribute("data-icon", icon);
        }

        let headline = create(&self.document, "h3")?;
        headline.set_text_content(Some(&item.headline));
        let _ = el.append_child(&headline);

        if presentation.show_text
            && let Some(text) = &item.text
        {
            let p = create(&self.document, "p")?;
            p.set_text_content(Some(text));
            let _ = el.append_child(&p);
        }

        if presentation.show_action
            && let Some(action) = &item.action
        {
            let a: HtmlAnchorElement = create(&self.document, "a")?.unchecked_into();
            a.set_href(&action.href);
            a.set_text_content(Some(&action.label));
            let _ = el.append_child(&a);
        }

        if presentation.inline_media
            && let Some(media) = media.and_then(|m| self.render_media(index, m))
        {
            let _ = el.append_child(&media);
        }
        Some(el)
    }

    fn render_media(&self, index: usize, media: &RenderableMedia) -> Option<HtmlElement> {
        match media {
            RenderableMedia::None => None,
            RenderableMedia::Image(image) => self.render_image(index, image),
            RenderableMedia::Video(video) => self.render_video(video),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "placeholder dimensions are small positive whole numbers"
    )]
    fn render_image(&self, index: usize, image: &ImageMedia) -> Option<HtmlElement> {
        let img: HtmlImageElement = create(&self.document, "img")?.unchecked_into();
        img.set_src(&image.url);
        img.set_alt(&format!("Media item {index}"));
        img.set_width(image.placeholder.width as u32);
        img.set_height(image.placeholder.height as u32);
        Some(img.unchecked_into())
    }

    fn render_video(&self, video: &VideoMedia) -> Option<HtmlElement> {
        let el: HtmlVideoElement = create(&self.document, "video")?.unchecked_into();
        el.set_autoplay(video.autoplay);
        el.set_muted(video.muted);
        el.set_loop(video.looping);
        el.set_preload(video.preload.as_str());
        if video.plays_inline {
            let _ = el.set_attribute("playsinline", "");
        }
        let source: HtmlSourceElement = create(&self.document, "source")?.unchecked_into();
        source.set_src(&video.url);
        source.set_type(video.mime_type());
        let _ = el.append_child(&source);
        let _ = el.append_with_str_1(VIDEO_FALLBACK_TEXT);
        Some(el.unchecked_into())
    }

    fn update_pane(&mut self, frame: &Frame<'_>) {
        if !frame.shows_media_pane() {
            let _ = self.pane.style().set_property("display", "none");
            self.pane.set_inner_html("");
            self.pane_key = None;
            return;
        }
        let _ = self.pane.style().remove_property("display");

        let key = pane_key(frame);
        if key == self.pane_key {
            return;
        }
        self.pane.set_inner_html("");
        if let Some((index, _)) = &key
            && let Some(el) = self.render_media(*index, frame.active_media)
        {
            let _ = self.pane.append_child(&el);
        }
        self.pane_key = key;
    }
}

impl Presenter for DomPresenter {
    fn present(&mut self, frame: &Frame<'_>) {
        self.list.set_inner_html("");
        for (index, item) in frame.items.iter().enumerate() {
            let presentation = frame.presentation(index);
            if let Some(el) = self.render_item(index, item, presentation, frame.media_for(index)) {
                let _ = self.list.append_child(&el);
            }
        }
        self.update_pane(frame);
    }
}

fn create(document: &Document, tag: &str) -> Option<HtmlElement> {
    Some(document.create_element(tag).ok()?.unchecked_into())
}

#[cfg(test)]
mod tests {
    use carousel_core::media::MediaFormat;
    use carousel_core::viewport::Layout;

    use super::*;

    fn frame<'a>(active_index: Option<usize>, media: &'a RenderableMedia) -> Frame<'a> {
        Frame {
            items: &[],
            active_index,
            layout: Layout {
                is_large_layout: true,
                is_touch_capable: false,
            },
            active_media: media,
            inline_media: &[],
        }
    }

    #[test]
    fn shared_asset_still_rebuilds_on_index_change() {
        let shared = RenderableMedia::Video(VideoMedia::ambient("/loop.mp4", MediaFormat::Mp4));
        let first = pane_key(&frame(Some(0), &shared));
        let second = pane_key(&frame(Some(1), &shared));
        assert_ne!(first, second, "same URL, different item");
        assert_eq!(first, pane_key(&frame(Some(0), &shared)), "stable re-render");
    }

    #[test]
    fn empty_pane_has_no_key() {
        let none = RenderableMedia::None;
        assert_eq!(pane_key(&frame(Some(0), &none)), None);
        let video = RenderableMedia::Video(VideoMedia::ambient("/a.webm", MediaFormat::Webm));
        assert_eq!(pane_key(&frame(None, &video)), None);
    }
}
