// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport classification.
//!
//! The carousel behaves differently on large layouts (autoplay, hover-style
//! expansion, a separate media pane) than on small and medium ones, and picks
//! different media for touch devices. This module turns raw environment
//! signals into a [`Layout`].
//!
//! # Touch detection
//!
//! Touch capability is decided by the first probe that is available:
//!
//! 1. maximum simultaneous touch points (`> 0` means touch),
//! 2. the `(pointer:coarse)` media feature,
//! 3. presence of the legacy `orientation` property (always touch),
//! 4. a case-insensitive, word-bounded search of the user agent for
//!    [`MOBILE_USER_AGENT_TOKENS`].
//!
//! If none of them is available the device is treated as not touch-capable.
//! [`ViewportClassifier`] runs the chain once and caches the answer for the
//! lifetime of the mounted carousel.

use alloc::string::String;

/// Smallest viewport width, in CSS pixels, that counts as a large layout.
pub const LARGE_LAYOUT_MIN_WIDTH: u32 = 1024;

/// User-agent tokens that identify a mobile device.
pub const MOBILE_USER_AGENT_TOKENS: [&str; 8] = [
    "BlackBerry",
    "webOS",
    "iPhone",
    "IEMobile",
    "Android",
    "Windows Phone",
    "iPad",
    "iPod",
];

/// The two width breakpoints the carousel listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    /// `(min-width: 1024px)`.
    Large,
    /// `(max-width: 1023px)`.
    SmallOrMedium,
}

impl Breakpoint {
    /// Both breakpoints, in registration order.
    pub const ALL: [Self; 2] = [Self::Large, Self::SmallOrMedium];

    /// Returns the CSS media query for this breakpoint.
    #[must_use]
    pub const fn media_query(self) -> &'static str {
        match self {
            Self::Large => "(min-width: 1024px)",
            Self::SmallOrMedium => "(max-width: 1023px)",
        }
    }

    /// Returns whether a viewport of `width` pixels matches this breakpoint.
    #[must_use]
    pub const fn matches(self, width: u32) -> bool {
        match self {
            Self::Large => width >= LARGE_LAYOUT_MIN_WIDTH,
            Self::SmallOrMedium => width < LARGE_LAYOUT_MIN_WIDTH,
        }
    }
}

/// The classification the rest of the engine consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Viewport is at least [`LARGE_LAYOUT_MIN_WIDTH`] wide.
    pub is_large_layout: bool,
    /// Device accepts touch input.
    pub is_touch_capable: bool,
}

/// Which probe decided touch capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchProbe {
    /// Maximum simultaneous touch points.
    MaxTouchPoints,
    /// The `(pointer:coarse)` media feature.
    CoarsePointer,
    /// The legacy `orientation` property.
    Orientation,
    /// User-agent token search.
    UserAgent,
    /// Nothing was available.
    Exhausted,
}

/// Outcome of the touch probe chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TouchDetection {
    /// Whether the device is touch-capable.
    pub capable: bool,
    /// The probe that decided.
    pub probe: TouchProbe,
}

/// Signals and listener registration supplied by the host platform.
///
/// Every probe method returns `None` (or `false`) when the platform cannot
/// answer; the classifier then moves on to the next probe.
pub trait Environment {
    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> u32;

    /// Maximum simultaneous touch points, if the platform reports it.
    fn max_touch_points(&self) -> Option<u32>;

    /// Whether `(pointer:coarse)` matches, if the media feature can be
    /// queried.
    fn coarse_pointer(&self) -> Option<bool>;

    /// Whether the legacy `orientation` property exists.
    fn has_orientation(&self) -> bool;

    /// The platform identification string, if any.
    fn user_agent(&self) -> Option<String>;

    /// Starts delivering change notifications for `breakpoint`.
    ///
    /// The host reacts to a notification by calling
    /// [`Carousel::on_viewport_change`](crate::engine::Carousel::on_viewport_change).
    fn watch_breakpoint(&mut self, breakpoint: Breakpoint);

    /// Stops delivering change notifications for `breakpoint`.
    fn unwatch_breakpoint(&mut self, breakpoint: Breakpoint);
}

/// Runs the touch probe chain against `env`.
#[must_use]
pub fn detect_touch<E: Environment + ?Sized>(env: &E) -> TouchDetection {
    if let Some(points) = env.max_touch_points() {
        return TouchDetection {
            capable: points > 0,
            probe: TouchProbe::MaxTouchPoints,
        };
    }
    if let Some(coarse) = env.coarse_pointer() {
        return TouchDetection {
            capable: coarse,
            probe: TouchProbe::CoarsePointer,
        };
    }
    if env.has_orientation() {
        return TouchDetection {
            capable: true,
            probe: TouchProbe::Orientation,
        };
    }
    match env.user_agent() {
        Some(ua) => TouchDetection {
            capable: is_mobile_user_agent(&ua),
            probe: TouchProbe::UserAgent,
        },
        None => TouchDetection {
            capable: false,
            probe: TouchProbe::Exhausted,
        },
    }
}

/// Returns whether `user_agent` contains one of [`MOBILE_USER_AGENT_TOKENS`]
/// as a whole word, ignoring ASCII case.
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_USER_AGENT_TOKENS
        .iter()
        .any(|token| contains_word(user_agent.as_bytes(), token.as_bytes()))
}

fn contains_word(haystack: &[u8], word: &[u8]) -> bool {
    if word.is_empty() || haystack.len() < word.len() {
        return false;
    }
    (0..=haystack.len() - word.len()).any(|start| {
        let end = start + word.len();
        haystack[start..end].eq_ignore_ascii_case(word)
            && (start == 0 || !is_word_byte(haystack[start - 1]))
            && (end == haystack.len() || !is_word_byte(haystack[end]))
    })
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Produces [`Layout`]s for one mounted carousel.
///
/// Width is re-read on every [`classify`](Self::classify); touch capability
/// is probed on the first call only.
#[derive(Clone, Debug, Default)]
pub struct ViewportClassifier {
    touch: Option<TouchDetection>,
}

impl ViewportClassifier {
    /// Creates a classifier that has not probed anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { touch: None }
    }

    /// Classifies the current environment.
    pub fn classify<E: Environment + ?Sized>(&mut self, env: &E) -> Layout {
        let touch = *self.touch.get_or_insert_with(|| detect_touch(env));
        Layout {
            is_large_layout: Breakpoint::Large.matches(env.viewport_width()),
            is_touch_capable: touch.capable,
        }
    }

    /// Returns the cached touch detection, if the chain has run.
    #[must_use]
    pub const fn touch_detection(&self) -> Option<TouchDetection> {
        self.touch
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;
    use core::cell::Cell;

    use super::*;

    #[derive(Default)]
    struct Probes {
        width: u32,
        touch_points: Option<u32>,
        coarse: Option<bool>,
        orientation: bool,
        ua: Option<&'static str>,
        probe_calls: Cell<u32>,
    }

    impl Environment for Probes {
        fn viewport_width(&self) -> u32 {
            self.width
        }
        fn max_touch_points(&self) -> Option<u32> {
            self.probe_calls.set(self.probe_calls.get() + 1);
            self.touch_points
        }
        fn coarse_pointer(&self) -> Option<bool> {
            self.coarse
        }
        fn has_orientation(&self) -> bool {
            self.orientation
        }
        fn user_agent(&self) -> Option<String> {
            self.ua.map(|ua| ua.to_string())
        }
        fn watch_breakpoint(&mut self, _breakpoint: Breakpoint) {}
        fn unwatch_breakpoint(&mut self, _breakpoint: Breakpoint) {}
    }

    #[test]
    fn breakpoints_split_at_1024() {
        assert!(!Breakpoint::Large.matches(1023));
        assert!(Breakpoint::Large.matches(1024));
        assert!(Breakpoint::SmallOrMedium.matches(1023));
        assert!(!Breakpoint::SmallOrMedium.matches(1024));
        assert_eq!(Breakpoint::Large.media_query(), "(min-width: 1024px)");
        assert_eq!(Breakpoint::SmallOrMedium.media_query(), "(max-width: 1023px)");
    }

    #[test]
    fn touch_points_win_over_later_probes() {
        let env = Probes {
            touch_points: Some(0),
            coarse: Some(true),
            orientation: true,
            ua: Some("iPhone"),
            ..Probes::default()
        };
        let d = detect_touch(&env);
        assert_eq!(d.probe, TouchProbe::MaxTouchPoints);
        assert!(!d.capable, "zero touch points means no touch");
    }

    #[test]
    fn coarse_pointer_used_when_touch_points_missing() {
        let env = Probes {
            coarse: Some(false),
            orientation: true,
            ..Probes::default()
        };
        let d = detect_touch(&env);
        assert_eq!(d.probe, TouchProbe::CoarsePointer);
        assert!(!d.capable);
    }

    #[test]
    fn orientation_is_a_touch_fallback() {
        let env = Probes {
            orientation: true,
            ..Probes::default()
        };
        assert_eq!(
            detect_touch(&env),
            TouchDetection {
                capable: true,
                probe: TouchProbe::Orientation
            }
        );
    }

    #[test]
    fn user_agent_is_the_last_resort() {
        let env = Probes {
            ua: Some("Mozilla/5.0 (Linux; Android 14; Pixel 8)"),
            ..Probes::default()
        };
        assert_eq!(
            detect_touch(&env),
            TouchDetection {
                capable: true,
                probe: TouchProbe::UserAgent
            }
        );
    }

    #[test]
    fn exhausted_chain_is_not_touch() {
        let d = detect_touch(&Probes::default());
        assert_eq!(d.probe, TouchProbe::Exhausted);
        assert!(!d.capable);
    }

    #[test]
    fn user_agent_tokens_need_word_boundaries() {
        assert!(is_mobile_user_agent("Mozilla/5.0 (iPad; CPU OS 17_0)"));
        assert!(is_mobile_user_agent("something windows phone 8.1"));
        assert!(is_mobile_user_agent("WEBOS"));
        assert!(!is_mobile_user_agent("Mozilla/5.0 (X11; Linux x86_64)"));
        assert!(!is_mobile_user_agent("NotAndroidish"));
        assert!(!is_mobile_user_agent("iPods"));
        assert!(!is_mobile_user_agent(""));
    }

    #[test]
    fn classifier_probes_touch_once() {
        let mut env = Probes {
            width: 1280,
            touch_points: Some(5),
            ..Probes::default()
        };
        let mut classifier = ViewportClassifier::new();
        let first = classifier.classify(&env);
        assert_eq!(
            first,
            Layout {
                is_large_layout: true,
                is_touch_capable: true
            }
        );

        env.width = 800;
        env.touch_points = Some(0);
        let second = classifier.classify(&env);
        assert!(!second.is_large_layout, "width is re-read");
        assert!(second.is_touch_capable, "touch answer is cached");
        assert_eq!(env.probe_calls.get(), 1, "probe chain ran once");
    }
}
