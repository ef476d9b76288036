// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted carousel session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Mounts a carousel on virtual time, lets it autoplay, clicks an item,
//! flaps the viewport across the breakpoint and unmounts, recording events
//! to both a [`PrettyPrintSink`](carousel_debug::pretty::PrettyPrintSink) and
//! a [`RecorderSink`](carousel_debug::recorder::RecorderSink). The recording
//! is then exported as a Chrome trace JSON file.
//!
//! Usage: `trace_demo [items.json]`. The optional file holds a JSON array of
//! carousel items; a built-in list is used otherwise.

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};

use carousel_core::autoplay::AutoplayConfig;
use carousel_core::item::{CarouselItem, MediaSource};
use carousel_core::time::Duration;
use carousel_harness::{DeviceProfile, Harness, RecordingPresenter};

use carousel_debug::pretty::PrettyPrintSink;
use carousel_debug::recorder::RecorderSink;

fn main() -> Result<(), Box<dyn Error>> {
    let items = match std::env::args().nth(1) {
        Some(path) => {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader::<_, Vec<CarouselItem>>(reader)?
        }
        None => default_items(),
    };
    let item_count = items.len();

    // -- sinks -------------------------------------------------------------
    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- session -----------------------------------------------------------
    {
        let mut harness = Harness::mount_with_sink(
            items,
            DeviceProfile::desktop(1280),
            AutoplayConfig::feature_carousel(),
            (pretty, &mut recorder),
        );
        let mut presenter = RecordingPresenter::new();

        // Three full cycles' worth of autoplay, rendering after each advance.
        for _ in 0..3 {
            harness.advance(Duration::from_secs(6));
            harness.render(&mut presenter)?;
        }

        // The user takes over.
        if item_count > 1 {
            harness.click(1)?;
        }
        let retired = harness.live_handles();
        harness.advance(Duration::from_secs(30));

        // Phone-sized and back; autoplay stays off after the click.
        harness.resize(800);
        harness.render(&mut presenter)?;
        harness.resize(1280);
        harness.render(&mut presenter)?;

        // A firing that was queued before the interval was cleared.
        for handle in retired {
            harness.deliver(handle);
        }

        harness.unmount();
        harness.advance(Duration::from_secs(12));
        println!(
            "Session: {} advances, {} frames presented",
            harness.history().len(),
            presenter.frames().len(),
        );
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    carousel_debug::chrome::export(recorder.as_bytes(), &mut writer)?;

    println!("Wrote {path} ({item_count} items)");
    Ok(())
}

fn default_items() -> Vec<CarouselItem> {
    vec![
        CarouselItem::new("Visual editing")
            .with_text("Click any text on the page and start typing.")
            .with_action("Learn more", "/features/visual-editing")
            .with_icon("pencil")
            .with_media(
                MediaSource::new("/media/visual-editing.mp4")
                    .with_touch_url("/media/visual-editing.gif"),
            ),
        CarouselItem::new("Live preview")
            .with_text("See drafts exactly as they will ship.")
            .with_icon("eye")
            .with_media(MediaSource::new("/media/live-preview.webm")),
        CarouselItem::new("Scheduling")
            .with_text("Publish at the right moment.")
            .with_action("Docs", "/docs/scheduling")
            .with_media(MediaSource::new("/media/scheduling.gif")),
    ]
}
