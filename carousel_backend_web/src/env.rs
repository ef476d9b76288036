// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser environment signals.
//!
//! [`WebEnvironment`] answers the touch probes from `navigator` and
//! `matchMedia`, reads the width from `window.innerWidth` and registers one
//! `change` listener per watched breakpoint query.
//!
//! A query that cannot be watched is logged to the console and reported by
//! [`WebEnvironment::failed_breakpoints`]; the carousel then only learns about
//! that breakpoint on its next reclassification.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, MediaQueryList, Window, console};

use carousel_core::viewport::{Breakpoint, Environment};

const COARSE_POINTER_QUERY: &str = "(pointer:coarse)";

type ChangeClosure = Closure<dyn FnMut(Event)>;

struct Listener {
    breakpoint: Breakpoint,
    query: MediaQueryList,
    closure: ChangeClosure,
}

/// An [`Environment`] backed by the browser window.
pub struct WebEnvironment {
    window: Window,
    on_change: Rc<dyn Fn()>,
    listeners: Vec<Listener>,
    failed: Vec<Breakpoint>,
}

impl WebEnvironment {
    /// Creates an environment for the current window.
    ///
    /// `on_change` runs whenever a watched breakpoint query flips; the host
    /// forwards it to
    /// [`Carousel::on_viewport_change`](carousel_core::engine::Carousel::on_viewport_change).
    ///
    /// # Errors
    ///
    /// Fails outside a browser window context.
    pub fn new(on_change: impl Fn() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        Ok(Self {
            window,
            on_change: Rc::new(on_change),
            listeners: Vec::new(),
            failed: Vec::new(),
        })
    }

    /// Returns how many breakpoint listeners are registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns the breakpoints whose last watch attempt failed.
    #[must_use]
    pub fn failed_breakpoints(&self) -> &[Breakpoint] {
        &self.failed
    }

    fn detach(&self, listener: &Listener) {
        let _ = listener.query.remove_event_listener_with_callback(
            "change",
            listener.closure.as_ref().unchecked_ref(),
        );
    }

    fn try_watch(&mut self, breakpoint: Breakpoint) -> bool {
        let Ok(Some(query)) = self.window.match_media(breakpoint.media_query()) else {
            return false;
        };
        let on_change = Rc::clone(&self.on_change);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            on_change();
        }) as Box<dyn FnMut(Event)>);
        if query
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .is_err()
        {
            return false;
        }
        self.listeners.push(Listener {
            breakpoint,
            query,
            closure,
        });
        true
    }
}

/// Keeps `failed` holding each breakpoint whose latest watch attempt failed.
fn record_watch(failed: &mut Vec<Breakpoint>, breakpoint: Breakpoint, watched: bool) {
    failed.retain(|&b| b != breakpoint);
    if !watched {
        failed.push(breakpoint);
    }
}

impl Environment for WebEnvironment {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "innerWidth is a small non-negative CSS pixel count"
    )]
    fn viewport_width(&self) -> u32 {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        width.max(0.0) as u32
    }

    fn max_touch_points(&self) -> Option<u32> {
        let navigator = self.window.navigator();
        let exposed = js_sys::Reflect::has(&navigator, &JsValue::from_str("maxTouchPoints"))
            .unwrap_or(false);
        exposed.then(|| u32::try_from(navigator.max_touch_points()).unwrap_or(0))
    }

    fn coarse_pointer(&self) -> Option<bool> {
        let query = self.window.match_media(COARSE_POINTER_QUERY).ok().flatten()?;
        // Browsers without the feature echo back "not all".
        (query.media() == COARSE_POINTER_QUERY).then(|| query.matches())
    }

    fn has_orientation(&self) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str("orientation")).unwrap_or(false)
    }

    fn user_agent(&self) -> Option<String> {
        self.window.navigator().user_agent().ok()
    }

    fn watch_breakpoint(&mut self, breakpoint: Breakpoint) {
        let watched = self.try_watch(breakpoint);
        if !watched {
            console::warn_1(&JsValue::from_str(&alloc::format!(
                "carousel: cannot watch {}",
                breakpoint.media_query()
            )));
        }
        record_watch(&mut self.failed, breakpoint, watched);
    }

    fn unwatch_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.failed.retain(|&b| b != breakpoint);
        if let Some(pos) = self.listeners.iter().position(|l| l.breakpoint == breakpoint) {
            let listener = self.listeners.remove(pos);
            self.detach(&listener);
        }
    }
}

impl Drop for WebEnvironment {
    fn drop(&mut self) {
        for listener in &self.listeners {
            self.detach(listener);
        }
    }
}

impl core::fmt::Debug for WebEnvironment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebEnvironment")
            .field("listeners", &self.listeners.len())
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_watch_is_reported_until_it_succeeds() {
        let mut failed = Vec::new();
        record_watch(&mut failed, Breakpoint::Large, false);
        record_watch(&mut failed, Breakpoint::SmallOrMedium, true);
        assert_eq!(failed, [Breakpoint::Large]);

        record_watch(&mut failed, Breakpoint::Large, false);
        assert_eq!(failed.len(), 1, "no duplicates on retry");

        record_watch(&mut failed, Breakpoint::Large, true);
        assert!(failed.is_empty());
    }
}
