// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted viewport and pointer signals.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use carousel_core::viewport::{Breakpoint, Environment};

/// Pointer and viewport signals of a simulated device.
///
/// `None` probes behave like a browser that lacks the API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Viewport width in CSS pixels.
    pub width: u32,
    /// `navigator.maxTouchPoints`, if exposed.
    pub max_touch_points: Option<u32>,
    /// Result of `(pointer:coarse)`, if media queries are supported.
    pub coarse_pointer: Option<bool>,
    /// The legacy `window.orientation` property exists.
    pub has_orientation: bool,
    /// User agent string, if exposed.
    pub user_agent: Option<String>,
}

impl DeviceProfile {
    /// A mouse-driven desktop browser.
    #[must_use]
    pub fn desktop(width: u32) -> Self {
        Self {
            width,
            max_touch_points: Some(0),
            coarse_pointer: Some(false),
            has_orientation: false,
            user_agent: Some(String::from(
                "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/140.0",
            )),
        }
    }

    /// A touch tablet.
    #[must_use]
    pub fn tablet(width: u32) -> Self {
        Self {
            width,
            max_touch_points: Some(5),
            coarse_pointer: Some(true),
            has_orientation: true,
            user_agent: Some(String::from(
                "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
            )),
        }
    }

    /// A browser that exposes none of the touch probes.
    #[must_use]
    pub fn bare(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct Device {
    profile: DeviceProfile,
    watched: Vec<Breakpoint>,
    touch_probes: u32,
}

/// An [`Environment`] backed by a [`DeviceProfile`] the test can change.
///
/// Clones share state.
#[derive(Clone, Debug, Default)]
pub struct FakeEnvironment {
    device: Rc<RefCell<Device>>,
}

impl FakeEnvironment {
    /// Creates an environment for `profile` with no listeners.
    #[must_use]
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            device: Rc::new(RefCell::new(Device {
                profile,
                ..Device::default()
            })),
        }
    }

    /// Changes the viewport width.
    ///
    /// Returns the watched breakpoints whose media query flipped, one entry
    /// per registered listener, in registration order.
    pub fn set_width(&self, width: u32) -> Vec<Breakpoint> {
        let mut device = self.device.borrow_mut();
        let old = device.profile.width;
        device.profile.width = width;
        device
            .watched
            .iter()
            .copied()
            .filter(|b| b.matches(old) != b.matches(width))
            .collect()
    }

    /// Returns the current viewport width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.device.borrow().profile.width
    }

    /// Returns how many breakpoint listeners are registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.device.borrow().watched.len()
    }

    /// Returns how many times the first touch probe was queried.
    #[must_use]
    pub fn touch_probe_count(&self) -> u32 {
        self.device.borrow().touch_probes
    }
}

impl Environment for FakeEnvironment {
    fn viewport_width(&self) -> u32 {
        self.device.borrow().profile.width
    }

    fn max_touch_points(&self) -> Option<u32> {
        let mut device = self.device.borrow_mut();
        device.touch_probes += 1;
        device.profile.max_touch_points
    }

    fn coarse_pointer(&self) -> Option<bool> {
        self.device.borrow().profile.coarse_pointer
    }

    fn has_orientation(&self) -> bool {
        self.device.borrow().profile.has_orientation
    }

    fn user_agent(&self) -> Option<String> {
        self.device.borrow().profile.user_agent.clone()
    }

    fn watch_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.device.borrow_mut().watched.push(breakpoint);
    }

    fn unwatch_breakpoint(&mut self, breakpoint: Breakpoint) {
        let mut device = self.device.borrow_mut();
        if let Some(pos) = device.watched.iter().position(|&b| b == breakpoint) {
            device.watched.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_flipped_queries_notify() {
        let mut env = FakeEnvironment::new(DeviceProfile::desktop(1280));
        for b in Breakpoint::ALL {
            env.watch_breakpoint(b);
        }
        assert!(env.set_width(1100).is_empty(), "still large");
        assert_eq!(env.set_width(900).len(), 2, "both queries flip");
    }

    #[test]
    fn unwatched_breakpoints_stay_quiet() {
        let mut env = FakeEnvironment::new(DeviceProfile::desktop(1280));
        env.watch_breakpoint(Breakpoint::Large);
        env.unwatch_breakpoint(Breakpoint::Large);
        assert_eq!(env.listener_count(), 0, "detached");
        assert!(env.set_width(320).is_empty(), "nobody listening");
    }
}
