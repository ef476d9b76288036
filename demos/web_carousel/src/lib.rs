// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: an autoplaying feature carousel.
//!
//! Mounts a [`Carousel`] into `#carousel`, wiring `setInterval` firings,
//! breakpoint `change` events and item clicks back into the engine and
//! re-rendering after each of them.
//!
//! Build with: `wasm-pack build --target web demos/web_carousel`
//! Then serve `demos/web_carousel/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::ToString as _;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use carousel_backend_web::{DomPresenter, INDEX_ATTRIBUTE, IntervalTimer, WebEnvironment};
use carousel_core::engine::Carousel;
use carousel_core::item::{CarouselItem, MediaSource};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement};

struct App {
    carousel: Carousel<WebEnvironment, IntervalTimer>,
    presenter: DomPresenter,
}

impl App {
    fn render(&mut self) {
        if let Err(err) = self.carousel.render(&mut self.presenter) {
            web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
        }
    }
}

type Shared = Rc<RefCell<Option<App>>>;

fn with_app(app: &Weak<RefCell<Option<App>>>, f: impl FnOnce(&mut App)) {
    let Some(cell) = app.upgrade() else {
        return;
    };
    let mut slot = cell.borrow_mut();
    if let Some(app) = slot.as_mut() {
        f(app);
    }
}

/// Entry point for the web carousel demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let container: HtmlElement = document
        .get_element_by_id("carousel")
        .ok_or_else(|| JsValue::from_str("missing #carousel"))?
        .unchecked_into();

    let shared: Shared = Rc::new(RefCell::new(None));

    let on_tick = Rc::downgrade(&shared);
    let timer = IntervalTimer::new(move |handle| {
        with_app(&on_tick, |app| {
            if app.carousel.on_timer(handle).is_some() {
                app.render();
            }
        });
    });

    let on_change = Rc::downgrade(&shared);
    let env = WebEnvironment::new(move || {
        with_app(&on_change, |app| {
            app.carousel.on_viewport_change();
            app.render();
        });
    })?;

    let presenter =
        DomPresenter::new(&container).ok_or_else(|| JsValue::from_str("detached container"))?;
    let carousel = Carousel::mount(demo_items(), env, timer);
    *shared.borrow_mut() = Some(App {
        carousel,
        presenter,
    });
    with_app(&Rc::downgrade(&shared), App::render);

    let on_click = Rc::downgrade(&shared);
    let selector = format!("[{INDEX_ATTRIBUTE}]");
    let click_cb = Closure::wrap(Box::new(move |event: Event| {
        let Some(index) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten())
            .and_then(|el| el.get_attribute(INDEX_ATTRIBUTE))
            .and_then(|v| v.parse::<usize>().ok())
        else {
            return;
        };
        with_app(&on_click, |app| {
            if app.carousel.select(index).is_ok() {
                app.render();
            }
        });
    }) as Box<dyn FnMut(Event)>);
    container.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
    click_cb.forget();

    // The carousel lives for the lifetime of the page.
    core::mem::forget(shared);
    Ok(())
}

fn demo_items() -> Vec<CarouselItem> {
    vec![
        CarouselItem::new("Visual editing")
            .with_text("Click any text on the page and start typing.")
            .with_action("Learn more", "#visual-editing")
            .with_icon("pencil")
            .with_media(
                MediaSource::new("media/visual-editing.mp4")
                    .with_touch_url("media/visual-editing.gif"),
            ),
        CarouselItem::new("Live preview")
            .with_text("See drafts exactly as they will ship.")
            .with_icon("eye")
            .with_media(MediaSource::new("media/live-preview.webm")),
        CarouselItem::new("Scheduling")
            .with_text("Publish at the right moment.")
            .with_action("Docs", "#scheduling")
            .with_media(MediaSource::new("media/scheduling.gif")),
    ]
}
