//! Plot telemetry lines from a file or standard input.
//!
//! ```bash
//! some_device_reader | waveplot
//! waveplot capture.txt --config plot.yaml
//! ```

use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use waveplot::{channel_lines, run_plot, PlotConfig};

#[derive(Parser, Debug)]
#[command(name = "waveplot", version, about = "Realtime telemetry line plotter")]
struct Args {
    /// Input file; reads standard input when omitted or "-".
    input: Option<PathBuf>,

    /// YAML or JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render tick period in milliseconds (overrides the config file).
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Window title (overrides the config file).
    #[arg(long)]
    title: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("waveplot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    if let Some(ms) = args.tick_ms {
        cfg.render_period_ms = ms;
    }
    if let Some(title) = args.title {
        cfg.title = title;
    }

    let (sink, rx) = channel_lines();
    let input = args.input.filter(|p| p.as_os_str() != "-");
    std::thread::spawn(move || {
        let result = match &input {
            Some(path) => std::fs::File::open(path)
                .and_then(|f| sink.forward_lines(BufReader::new(f))),
            None => sink.forward_lines(std::io::stdin().lock()),
        };
        match result {
            Ok(n) => tracing::info!(lines = n, "input finished"),
            Err(e) => tracing::error!(error = %e, "input failed"),
        }
    });

    run_plot(rx, cfg)?;
    Ok(())
}
