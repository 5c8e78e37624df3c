//! Demo: streaming sine wave with a live fit
//!
//! What it demonstrates
//! - Feeding text lines through `channel_lines()` from a producer thread.
//! - Starting in Fit mode with a sine fit via `PlotConfig::defaults`.
//!
//! How to run
//! ```bash
//! cargo run --example sine_feed
//! ```
//! A clean 1.5 Hz sine on CH:0 with its fitted curve drawn on top.

use std::time::Duration;

use waveplot::{channel_lines, run_plot, FitType, PlotConfig, RenderMode};

fn main() -> eframe::Result<()> {
    let (sink, rx) = channel_lines();

    std::thread::spawn(move || {
        const FS_HZ: f64 = 200.0;
        const F_HZ: f64 = 1.5;
        let mut n: u64 = 0;
        loop {
            let t = n as f64 / FS_HZ;
            let y = 3.0 * (2.0 * std::f64::consts::PI * F_HZ * t).sin() + 1.0;
            // Ignore error if the UI closed (receiver dropped)
            if sink.send_line(format!("CH:0,[{t:.4},{y:.5}],SEQ:{n}")).is_err() {
                break;
            }
            n = n.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(5));
        }
    });

    let mut cfg = PlotConfig::default();
    cfg.title = "Sine feed".into();
    cfg.defaults.render_mode = RenderMode::Fit;
    cfg.defaults.fit_type = FitType::Sine;
    cfg.defaults.fit_window = 400;
    run_plot(rx, cfg)
}
