// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setInterval` timer.
//!
//! [`IntervalTimer`] arms browser intervals on behalf of the engine. Each
//! firing calls the dispatch callback with the [`TimerHandle`] of the interval
//! that fired; the host forwards it to
//! [`Carousel::on_timer`](carousel_core::engine::Carousel::on_timer).

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use carousel_core::time::{Duration, HostTime};
use carousel_core::timer::{Timer, TimerHandle};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(handler: &JsValue, timeout: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);
}

type IntervalClosure = Closure<dyn FnMut()>;

/// A [`Timer`] backed by `window.setInterval`.
pub struct IntervalTimer {
    dispatch: Rc<dyn Fn(TimerHandle)>,
    live: Vec<(TimerHandle, IntervalClosure)>,
    /// Closures of cleared intervals.
    ///
    /// A clear can happen from inside the interval's own callback, so the
    /// closure is only dropped on a later call.
    retired: Vec<IntervalClosure>,
}

impl IntervalTimer {
    /// Creates a timer that reports firings to `dispatch`.
    pub fn new(dispatch: impl Fn(TimerHandle) + 'static) -> Self {
        Self {
            dispatch: Rc::new(dispatch),
            live: Vec::new(),
            retired: Vec::new(),
        }
    }

    /// Returns how many intervals are armed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Timer for IntervalTimer {
    fn now(&self) -> HostTime {
        crate::now()
    }

    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        self.retired.clear();

        let id = Rc::new(Cell::new(0));
        let dispatch = Rc::clone(&self.dispatch);
        let fired_id = Rc::clone(&id);
        let closure = Closure::wrap(Box::new(move || {
            dispatch(TimerHandle(fired_id.get()));
        }) as Box<dyn FnMut()>);

        let timeout = i32::try_from(period.as_millis()).unwrap_or(i32::MAX);
        let handle = TimerHandle(set_interval(closure.as_ref().unchecked_ref(), timeout));
        id.set(handle.0);
        self.live.push((handle, closure));
        handle
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        clear_interval(handle.0);
        if let Some(pos) = self.live.iter().position(|(h, _)| *h == handle) {
            let (_, closure) = self.live.remove(pos);
            self.retired.push(closure);
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        for (handle, _) in &self.live {
            clear_interval(handle.0);
        }
    }
}

impl core::fmt::Debug for IntervalTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("live", &self.live.iter().map(|(h, _)| *h).collect::<Vec<_>>())
            .field("retired", &self.retired.len())
            .finish_non_exhaustive()
    }
}
