// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Autoplay intervals become duration slices (`B`/`E`) on a dedicated track
//! so that gaps in cycling are visible at a glance; everything else is an
//! instant event on the carousel track.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use carousel_core::time::HostTime;
use carousel_core::viewport::Layout;

use crate::recorder::{RecordedEvent, decode};

const TID_CAROUSEL: u32 = 0;
const TID_AUTOPLAY: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Media events carry no timestamp of their own and are placed at the time of
/// the preceding timed event.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last = HostTime::ZERO;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Mount(e) => {
                last = e.at;
                events.push(instant("Mount", "Lifecycle", e.at, json!({
                    "item_count": e.item_count,
                    "layout": layout_json(e.layout),
                })));
            }
            RecordedEvent::Unmount(e) => {
                last = e.at;
                events.push(instant("Unmount", "Lifecycle", e.at, json!({})));
            }
            RecordedEvent::TouchProbe(e) => {
                last = e.at;
                events.push(instant("TouchProbe", "Viewport", e.at, json!({
                    "probe": format!("{:?}", e.probe),
                    "capable": e.capable,
                })));
            }
            RecordedEvent::LayoutChange(e) => {
                last = e.at;
                events.push(instant("LayoutChange", "Viewport", e.at, json!({
                    "previous": layout_json(e.previous),
                    "layout": layout_json(e.layout),
                })));
            }
            RecordedEvent::AutoplayStart(e) => {
                last = e.at;
                events.push(json!({
                    "ph": "B",
                    "name": "Autoplay",
                    "cat": "Autoplay",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": TID_AUTOPLAY,
                    "args": {
                        "handle": e.handle.0,
                        "period_ms": e.period.as_millis(),
                    }
                }));
            }
            RecordedEvent::AutoplayStop(e) => {
                last = e.at;
                events.push(json!({
                    "ph": "E",
                    "name": "Autoplay",
                    "cat": "Autoplay",
                    "ts": to_us(e.at),
                    "pid": 0,
                    "tid": TID_AUTOPLAY,
                    "args": {
                        "handle": e.handle.0,
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            RecordedEvent::Advance(e) => {
                last = e.at;
                events.push(instant("Advance", "Autoplay", e.at, json!({
                    "from": e.from,
                    "to": e.to,
                })));
            }
            RecordedEvent::StaleTick(e) => {
                last = e.at;
                events.push(instant("StaleTick", "Autoplay", e.at, json!({
                    "handle": e.handle.0,
                })));
            }
            RecordedEvent::Select(e) => {
                last = e.at;
                events.push(instant("Select", "Input", e.at, json!({
                    "index": e.index,
                })));
            }
            RecordedEvent::MediaResolved(e) => {
                events.push(instant("MediaResolved", "Media", last, json!({
                    "index": e.index,
                    "mime": e.format.map(|f| f.mime_type()),
                })));
            }
            RecordedEvent::MediaRejected { index, extension } => {
                events.push(instant("MediaRejected", "Media", last, json!({
                    "index": index,
                    "extension": extension,
                })));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, cat: &str, at: HostTime, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": to_us(at),
        "pid": 0,
        "tid": TID_CAROUSEL,
        "s": "t",
        "args": args,
    })
}

fn layout_json(layout: Layout) -> Value {
    json!({
        "large": layout.is_large_layout,
        "touch": layout.is_touch_capable,
    })
}

fn to_us(t: HostTime) -> u64 {
    t.millis().saturating_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use carousel_core::autoplay::StopReason;
    use carousel_core::time::Duration;
    use carousel_core::timer::TimerHandle;
    use carousel_core::trace::{
        AdvanceEvent, AutoplayStartEvent, AutoplayStopEvent, MediaRejectedEvent, TraceSink,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_autoplay_start(&AutoplayStartEvent {
            at: HostTime(0),
            handle: TimerHandle(1),
            period: Duration::from_secs(6),
        });
        rec.on_advance(&AdvanceEvent {
            at: HostTime(6_000),
            from: Some(0),
            to: 1,
        });
        rec.on_autoplay_stop(&AutoplayStopEvent {
            at: HostTime(9_000),
            handle: TimerHandle(1),
            reason: StopReason::UserSelected,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3, "three events");

        assert_eq!(parsed[0]["ph"], "B", "interval opens a slice");
        assert_eq!(parsed[1]["name"], "Advance", "instant in between");
        assert_eq!(parsed[1]["ts"], 6_000_000, "microseconds");
        assert_eq!(parsed[2]["ph"], "E", "stop closes the slice");
        assert_eq!(parsed[2]["args"]["reason"], "UserSelected", "stop reason");
    }

    #[test]
    fn media_events_borrow_the_previous_timestamp() {
        let mut rec = RecorderSink::new();
        rec.on_advance(&AdvanceEvent {
            at: HostTime(12_000),
            from: Some(1),
            to: 2,
        });
        rec.on_media_rejected(&MediaRejectedEvent {
            index: 2,
            extension: "mov",
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[1]["ts"], 12_000_000, "same instant as the advance");
        assert_eq!(parsed[1]["args"]["extension"], "mov", "extension kept");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty(), "no events");
    }
}
