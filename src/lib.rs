//! waveplot crate root: re-exports and module wiring.
//!
//! A realtime multi-curve plotter for line-oriented telemetry text such as
//! `CH:1,[0.25,3.1],TEMP:20`. Lines are parsed, routed to per-channel rolling
//! buffers and rendered on a fixed tick, with optional sine, triangle or
//! square waveform fits over the visible window.
//!
//! - `data`: parser, metadata store, curves, viewport and fit engine (no UI)
//! - `engine`: the single-threaded core tying them together, plus the tick
//! - `sink`: channel types to feed lines from any thread
//! - `events`: subscriber notifications
//! - `config`: configuration and file loading
//! - `app`: egui/eframe front end

pub mod app;
pub mod config;
pub mod data;
pub mod engine;
pub mod events;
pub mod sink;

// Public re-exports for a compact external API
pub use app::{run_plot, PlotApp};
pub use config::{ConfigError, CurveSettings, FitConfig, PlotConfig};
pub use data::curve::{ChannelId, Curve, FitType, RenderMode};
pub use data::parser::{parse_line, ParsedLine};
pub use engine::{PlotEngine, RenderScheduler};
pub use events::{EventController, EventFilter, EventKind, PlotEvent};
pub use sink::{channel_lines, LineSink, PlotCommand};
