//! Demo: several channels, metadata and event subscription
//!
//! What it demonstrates
//! - Lines routed by `CH:<n>` to separate curves, created on first sight.
//! - Lines without a channel going to the active curve.
//! - Metadata keys (`TEMP`, `MODE`) that can be ticked in the side panel.
//! - Subscribing to curve and metadata events through `EventController`.
//!
//! How to run
//! ```bash
//! cargo run --example mixed_channels
//! ```

use std::time::Duration;

use waveplot::{channel_lines, run_plot, EventController, EventFilter, EventKind, PlotConfig};

fn main() -> eframe::Result<()> {
    let events = EventController::new();
    let ev_rx = events.subscribe(EventFilter::only(
        EventKind::CURVE_ADDED | EventKind::CURVE_REMOVED | EventKind::META_KEY_SEEN,
    ));
    std::thread::spawn(move || {
        while let Ok(evt) = ev_rx.recv() {
            println!("[event] {}", evt.kinds);
            if let Some(c) = &evt.curve {
                println!("  curve {} (index {})", c.name, c.index);
            }
            if let Some(m) = &evt.meta {
                println!("  new keys: {:?}", m.new_keys);
            }
        }
    });

    let (sink, rx) = channel_lines();
    std::thread::spawn(move || {
        let mut n: u64 = 0;
        loop {
            let t = n as f64 * 0.01;
            let tri = 2.0 * ((t / 2.0).fract() - 0.5).abs() * 4.0 - 2.0;
            let square = if (t * 0.7).fract() < 0.3 { 1.5 } else { -0.5 };
            let lines = [
                format!("CH:1,[{t:.3},{tri:.4}],TEMP:{:.1}", 20.0 + (t * 0.1).sin()),
                format!("CH:2,[{t:.3},{square}],MODE:run"),
                // no channel: lands on whichever curve is active
                format!("{t:.3},{:.4}", (t * 3.0).cos() * 0.5),
            ];
            if sink.send_lines(lines).is_err() {
                break;
            }
            n = n.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(10));
        }
    });

    let mut cfg = PlotConfig::default();
    cfg.title = "Mixed channels".into();
    cfg.events = Some(events);
    run_plot(rx, cfg)
}
