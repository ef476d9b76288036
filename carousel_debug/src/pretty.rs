// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in seconds since the host clock's origin.

use std::io::Write;

use carousel_core::time::HostTime;
use carousel_core::trace::{
    AdvanceEvent, AutoplayStartEvent, AutoplayStopEvent, LayoutChangeEvent, MediaRejectedEvent,
    MediaResolvedEvent, MountEvent, SelectEvent, StaleTickEvent, TouchProbeEvent, TraceSink,
    UnmountEvent,
};
use carousel_core::viewport::Layout;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn secs(t: HostTime) -> f64 {
    t.millis() as f64 / 1000.0
}

fn layout_name(layout: Layout) -> &'static str {
    match (layout.is_large_layout, layout.is_touch_capable) {
        (true, false) => "large",
        (true, true) => "large+touch",
        (false, false) => "small",
        (false, true) => "small+touch",
    }
}

fn index_name(index: Option<usize>) -> String {
    index.map_or_else(|| "-".to_owned(), |i| i.to_string())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_mount(&mut self, e: &MountEvent) {
        let _ = writeln!(
            self.writer,
            "[mount] t={:.3}s items={} layout={}",
            secs(e.at),
            e.item_count,
            layout_name(e.layout),
        );
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        let _ = writeln!(self.writer, "[unmount] t={:.3}s", secs(e.at));
    }

    fn on_touch_probe(&mut self, e: &TouchProbeEvent) {
        let _ = writeln!(
            self.writer,
            "[touch] t={:.3}s probe={:?} capable={}",
            secs(e.at),
            e.probe,
            e.capable,
        );
    }

    fn on_layout_change(&mut self, e: &LayoutChangeEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] t={:.3}s {} -> {}",
            secs(e.at),
            layout_name(e.previous),
            layout_name(e.layout),
        );
    }

    fn on_autoplay_start(&mut self, e: &AutoplayStartEvent) {
        let _ = writeln!(
            self.writer,
            "[autoplay:start] t={:.3}s handle={} period={}ms",
            secs(e.at),
            e.handle.0,
            e.period.as_millis(),
        );
    }

    fn on_autoplay_stop(&mut self, e: &AutoplayStopEvent) {
        let _ = writeln!(
            self.writer,
            "[autoplay:stop] t={:.3}s handle={} reason={:?}",
            secs(e.at),
            e.handle.0,
            e.reason,
        );
    }

    fn on_advance(&mut self, e: &AdvanceEvent) {
        let _ = writeln!(
            self.writer,
            "[advance] t={:.3}s {} -> {}",
            secs(e.at),
            index_name(e.from),
            e.to,
        );
    }

    fn on_stale_tick(&mut self, e: &StaleTickEvent) {
        let _ = writeln!(
            self.writer,
            "[stale] t={:.3}s handle={} DROPPED",
            secs(e.at),
            e.handle.0,
        );
    }

    fn on_select(&mut self, e: &SelectEvent) {
        let _ = writeln!(
            self.writer,
            "[select] t={:.3}s index={}",
            secs(e.at),
            e.index,
        );
    }

    fn on_media_resolved(&mut self, e: &MediaResolvedEvent) {
        let format = e.format.map_or("none", |f| f.mime_type());
        let _ = writeln!(self.writer, "[media] item={} {format}", e.index);
    }

    fn on_media_rejected(&mut self, e: &MediaRejectedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[media] item={} UNSUPPORTED .{}",
            e.index, e.extension,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::autoplay::StopReason;
    use carousel_core::timer::TimerHandle;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_advance() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_advance(&AdvanceEvent {
            at: HostTime(12_000),
            from: None,
            to: 0,
        });
        let output = output(sink);
        assert!(output.contains("[advance]"), "got: {output}");
        assert!(output.contains("t=12.000s"), "got: {output}");
        assert!(output.contains("- -> 0"), "got: {output}");
    }

    #[test]
    fn pretty_print_stop_reason() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_autoplay_stop(&AutoplayStopEvent {
            at: HostTime(9_000),
            handle: TimerHandle(3),
            reason: StopReason::UserSelected,
        });
        let output = output(sink);
        assert!(output.contains("handle=3"), "got: {output}");
        assert!(output.contains("reason=UserSelected"), "got: {output}");
    }

    #[test]
    fn pretty_print_rejected_media() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_media_rejected(&MediaRejectedEvent {
            index: 2,
            extension: "mov",
        });
        let output = output(sink);
        assert!(output.contains("item=2 UNSUPPORTED .mov"), "got: {output}");
    }
}
