// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. Every record is fixed-size except
//! [`MediaRejectedEvent`], which carries a length-prefixed extension.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].

use carousel_core::autoplay::StopReason;
use carousel_core::media::MediaFormat;
use carousel_core::time::{Duration, HostTime};
use carousel_core::timer::TimerHandle;
use carousel_core::trace::{
    AdvanceEvent, AutoplayStartEvent, AutoplayStopEvent, LayoutChangeEvent, MediaRejectedEvent,
    MediaResolvedEvent, MountEvent, SelectEvent, StaleTickEvent, TouchProbeEvent, TraceSink,
    UnmountEvent,
};
use carousel_core::viewport::{Layout, TouchProbe};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_MOUNT: u8 = 1;
const TAG_UNMOUNT: u8 = 2;
const TAG_TOUCH_PROBE: u8 = 3;
const TAG_LAYOUT_CHANGE: u8 = 4;
const TAG_AUTOPLAY_START: u8 = 5;
const TAG_AUTOPLAY_STOP: u8 = 6;
const TAG_ADVANCE: u8 = 7;
const TAG_STALE_TICK: u8 = 8;
const TAG_SELECT: u8 = 9;
const TAG_MEDIA_RESOLVED: u8 = 10;
const TAG_MEDIA_REJECTED: u8 = 11;

const LAYOUT_LARGE: u8 = 1 << 0;
const LAYOUT_TOUCH: u8 = 1 << 1;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_index(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_option_index(&mut self, v: Option<usize>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_index(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_handle(&mut self, h: TimerHandle) {
        self.buf.extend_from_slice(&h.0.to_le_bytes());
    }

    fn write_layout(&mut self, layout: Layout) {
        let mut bits = 0;
        if layout.is_large_layout {
            bits |= LAYOUT_LARGE;
        }
        if layout.is_touch_capable {
            bits |= LAYOUT_TOUCH;
        }
        self.write_u8(bits);
    }

    fn write_probe(&mut self, p: TouchProbe) {
        self.write_u8(match p {
            TouchProbe::MaxTouchPoints => 0,
            TouchProbe::CoarsePointer => 1,
            TouchProbe::Orientation => 2,
            TouchProbe::UserAgent => 3,
            TouchProbe::Exhausted => 4,
        });
    }

    fn write_reason(&mut self, r: StopReason) {
        self.write_u8(match r {
            StopReason::LayoutCollapsed => 0,
            StopReason::UserSelected => 1,
            StopReason::Paused => 2,
            StopReason::ItemsCleared => 3,
            StopReason::Unmounted => 4,
        });
    }

    fn write_format(&mut self, f: Option<MediaFormat>) {
        self.write_u8(match f {
            None => 0,
            Some(MediaFormat::Gif) => 1,
            Some(MediaFormat::Mp4) => 2,
            Some(MediaFormat::Webm) => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_mount(&mut self, e: &MountEvent) {
        self.write_u8(TAG_MOUNT);
        self.write_u64(e.at.millis());
        self.write_index(e.item_count);
        self.write_layout(e.layout);
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        self.write_u8(TAG_UNMOUNT);
        self.write_u64(e.at.millis());
    }

    fn on_touch_probe(&mut self, e: &TouchProbeEvent) {
        self.write_u8(TAG_TOUCH_PROBE);
        self.write_u64(e.at.millis());
        self.write_probe(e.probe);
        self.write_u8(u8::from(e.capable));
    }

    fn on_layout_change(&mut self, e: &LayoutChangeEvent) {
        self.write_u8(TAG_LAYOUT_CHANGE);
        self.write_u64(e.at.millis());
        self.write_layout(e.previous);
        self.write_layout(e.layout);
    }

    fn on_autoplay_start(&mut self, e: &AutoplayStartEvent) {
        self.write_u8(TAG_AUTOPLAY_START);
        self.write_u64(e.at.millis());
        self.write_handle(e.handle);
        self.write_u64(e.period.as_millis());
    }

    fn on_autoplay_stop(&mut self, e: &AutoplayStopEvent) {
        self.write_u8(TAG_AUTOPLAY_STOP);
        self.write_u64(e.at.millis());
        self.write_handle(e.handle);
        self.write_reason(e.reason);
    }

    fn on_advance(&mut self, e: &AdvanceEvent) {
        self.write_u8(TAG_ADVANCE);
        self.write_u64(e.at.millis());
        self.write_option_index(e.from);
        self.write_index(e.to);
    }

    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        self.write_u8(TAG_STALE_TICK);
        self.write_u64(e.at.millis());
        self.write_handle(e.handle);
    }

    fn on_select(&mut self, e: &SelectEvent) {
        self.write_u8(TAG_SELECT);
        self.write_u64(e.at.millis());
        self.write_index(e.index);
    }

    fn on_media_resolved(&mut self, e: &MediaResolvedEvent) {
        self.write_u8(TAG_MEDIA_RESOLVED);
        self.write_index(e.index);
        self.write_format(e.format);
    }

    fn on_media_rejected(&mut self, e: &MediaRejectedEvent<'_>) {
        self.write_u8(TAG_MEDIA_REJECTED);
        self.write_index(e.index);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "extension length capped at u32::MAX for recording"
        )]
        let len = e.extension.len().min(u32::MAX as usize) as u32;
        self.write_u32(len);
        self.buf
            .extend_from_slice(&e.extension.as_bytes()[..len as usize]);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`MountEvent`].
    Mount(MountEvent),
    /// An [`UnmountEvent`].
    Unmount(UnmountEvent),
    /// A [`TouchProbeEvent`].
    TouchProbe(TouchProbeEvent),
    /// A [`LayoutChangeEvent`].
    LayoutChange(LayoutChangeEvent),
    /// An [`AutoplayStartEvent`].
    AutoplayStart(AutoplayStartEvent),
    /// An [`AutoplayStopEvent`].
    AutoplayStop(AutoplayStopEvent),
    /// An [`AdvanceEvent`].
    Advance(AdvanceEvent),
    /// A [`StaleTickEvent`].
    StaleTick(StaleTickEvent),
    /// A [`SelectEvent`].
    Select(SelectEvent),
    /// A [`MediaResolvedEvent`].
    MediaResolved(MediaResolvedEvent),
    /// An owned [`MediaRejectedEvent`].
    MediaRejected {
        /// Item index.
        index: usize,
        /// The offending extension.
        extension: String,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, n: usize) -> Option<&[u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        Some(self.read_bytes(1)?[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_index(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_option_index(&mut self) -> Option<Option<usize>> {
        let present = self.read_u8()?;
        let val = self.read_index()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_handle(&mut self) -> Option<TimerHandle> {
        Some(TimerHandle(i32::from_le_bytes(
            self.read_bytes(4)?.try_into().ok()?,
        )))
    }

    fn read_layout(&mut self) -> Option<Layout> {
        let bits = self.read_u8()?;
        Some(Layout {
            is_large_layout: bits & LAYOUT_LARGE != 0,
            is_touch_capable: bits & LAYOUT_TOUCH != 0,
        })
    }

    fn read_probe(&mut self) -> Option<TouchProbe> {
        Some(match self.read_u8()? {
            0 => TouchProbe::MaxTouchPoints,
            1 => TouchProbe::CoarsePointer,
            2 => TouchProbe::Orientation,
            3 => TouchProbe::UserAgent,
            _ => TouchProbe::Exhausted,
        })
    }

    fn read_reason(&mut self) -> Option<StopReason> {
        Some(match self.read_u8()? {
            0 => StopReason::LayoutCollapsed,
            1 => StopReason::UserSelected,
            2 => StopReason::Paused,
            3 => StopReason::ItemsCleared,
            _ => StopReason::Unmounted,
        })
    }

    fn read_format(&mut self) -> Option<Option<MediaFormat>> {
        Some(match self.read_u8()? {
            1 => Some(MediaFormat::Gif),
            2 => Some(MediaFormat::Mp4),
            3 => Some(MediaFormat::Webm),
            _ => None,
        })
    }

    fn decode_mount(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Mount(MountEvent {
            at: self.read_time()?,
            item_count: self.read_index()?,
            layout: self.read_layout()?,
        }))
    }

    fn decode_touch_probe(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TouchProbe(TouchProbeEvent {
            at: self.read_time()?,
            probe: self.read_probe()?,
            capable: self.read_u8()? != 0,
        }))
    }

    fn decode_layout_change(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayoutChange(LayoutChangeEvent {
            at: self.read_time()?,
            previous: self.read_layout()?,
            layout: self.read_layout()?,
        }))
    }

    fn decode_autoplay_start(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::AutoplayStart(AutoplayStartEvent {
            at: self.read_time()?,
            handle: self.read_handle()?,
            period: Duration(self.read_u64()?),
        }))
    }

    fn decode_autoplay_stop(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::AutoplayStop(AutoplayStopEvent {
            at: self.read_time()?,
            handle: self.read_handle()?,
            reason: self.read_reason()?,
        }))
    }

    fn decode_advance(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Advance(AdvanceEvent {
            at: self.read_time()?,
            from: self.read_option_index()?,
            to: self.read_index()?,
        }))
    }

    fn decode_media_rejected(&mut self) -> Option<RecordedEvent> {
        let index = self.read_index()?;
        let len = usize::try_from(self.read_u32()?).ok()?;
        let extension = String::from_utf8_lossy(self.read_bytes(len)?).into_owned();
        Some(RecordedEvent::MediaRejected { index, extension })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_MOUNT => self.decode_mount(),
            TAG_UNMOUNT => Some(RecordedEvent::Unmount(UnmountEvent {
                at: self.read_time()?,
            })),
            TAG_TOUCH_PROBE => self.decode_touch_probe(),
            TAG_LAYOUT_CHANGE => self.decode_layout_change(),
            TAG_AUTOPLAY_START => self.decode_autoplay_start(),
            TAG_AUTOPLAY_STOP => self.decode_autoplay_stop(),
            TAG_ADVANCE => self.decode_advance(),
            TAG_STALE_TICK => Some(RecordedEvent::StaleTick(StaleTickEvent {
                at: self.read_time()?,
                handle: self.read_handle()?,
            })),
            TAG_SELECT => Some(RecordedEvent::Select(SelectEvent {
                at: self.read_time()?,
                index: self.read_index()?,
            })),
            TAG_MEDIA_RESOLVED => Some(RecordedEvent::MediaResolved(MediaResolvedEvent {
                index: self.read_index()?,
                format: self.read_format()?,
            })),
            TAG_MEDIA_REJECTED => self.decode_media_rejected(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
