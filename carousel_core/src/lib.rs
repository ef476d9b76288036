// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machine for an autoplaying feature carousel.
//!
//! `carousel_core` decides which item of a list is highlighted, when the
//! highlight advances on its own, when it stops, and which media asset the
//! highlighted item shows. It is `no_std` compatible (with `alloc`) and owns
//! no platform resources: the viewport, the clock and the presentation tree
//! are all injected through traits.
//!
//! # Architecture
//!
//! ```text
//!   Environment ──► ViewportClassifier ──► Layout
//!                                            │
//!   Timer ◄──── set/clear ────── Autoplay ◄──┤◄── select / set_items
//!     │                              │       │
//!     └── on_timer(handle) ──────────┘       ▼
//!                                   media::resolve ──► Frame ──► Presenter
//! ```
//!
//! **[`viewport`]** — Breakpoint and touch classification. Width is re-read
//! on every breakpoint notification; touch capability is probed once.
//!
//! **[`autoplay`]** — The autoplay scheduler: active index, user-override
//! latch and at most one live interval handle.
//!
//! **[`media`]** — Chooses the desktop or touch asset and maps its file
//! extension to an image or ambient video descriptor.
//!
//! **[`presentation`]** — Per-item display rules for large and small
//! layouts.
//!
//! **[`engine`]** — [`Carousel`](engine::Carousel), which wires the pieces
//! above to an environment, a timer and a trace sink.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait and the
//! [`Frame`](backend::Frame) handed to it.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `serde` (disabled by default): Derives `Serialize`/`Deserialize` for the
//!   item model so hosts can load items from JSON.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod autoplay;
pub mod backend;
pub mod engine;
pub mod item;
pub mod media;
pub mod presentation;
pub mod time;
pub mod timer;
pub mod trace;
pub mod viewport;
