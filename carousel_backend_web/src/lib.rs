// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for carousel.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`IntervalTimer`]: `setInterval`-driven [`Timer`](carousel_core::timer::Timer)
//! - [`WebEnvironment`]: viewport width, pointer probes and breakpoint
//!   `matchMedia` listeners
//! - [`DomPresenter`]: DOM element management

#![no_std]

extern crate alloc;

mod env;
mod interval;
mod presenter;

pub use carousel_core::backend::Presenter;
pub use env::WebEnvironment;
pub use interval::IntervalTimer;
pub use presenter::{DomPresenter, INDEX_ATTRIBUTE};

use carousel_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in whole milliseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = interval::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; ms fits in u64"
    )]
    let ms = ms as u64;
    HostTime(ms)
}
