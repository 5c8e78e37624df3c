//! Configuration for the waveform plotter.
//!
//! [`PlotConfig`] can be built in code or loaded from a YAML/JSON file. Values
//! read from disk go through [`PlotConfig::validated`] so every numeric field
//! ends up inside its supported range.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::EventController;

pub use crate::data::curve::CurveSettings;

/// Render tick period used when none is configured (~30 FPS).
pub const DEFAULT_RENDER_PERIOD_MS: u64 = 33;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parameters of the fit engine shared by all curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Points in a rendered fit line.
    pub samples: usize,
    /// Lower bound for the square-wave duty cycle.
    pub duty_min: f64,
    /// Upper bound for the square-wave duty cycle.
    pub duty_max: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            samples: 400,
            duty_min: 0.05,
            duty_max: 0.95,
        }
    }
}

impl FitConfig {
    pub fn validated(mut self) -> Self {
        self.samples = self.samples.max(2);
        if !self.duty_min.is_finite() {
            self.duty_min = 0.0;
        }
        if !self.duty_max.is_finite() {
            self.duty_max = 1.0;
        }
        self.duty_min = self.duty_min.clamp(0.0, 1.0);
        self.duty_max = self.duty_max.clamp(self.duty_min, 1.0);
        self
    }
}

/// Top-level configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Window title.
    pub title: String,
    /// Render tick period in milliseconds.
    pub render_period_ms: u64,
    /// Settings for curves created before any curve is active.
    pub defaults: CurveSettings,
    pub fit: FitConfig,
    /// Optional subscriber hub for curve, metadata and render notifications.
    #[serde(skip)]
    pub events: Option<EventController>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "Waveform Plot".to_string(),
            render_period_ms: DEFAULT_RENDER_PERIOD_MS,
            defaults: CurveSettings::default(),
            fit: FitConfig::default(),
            events: None,
        }
    }
}

impl std::fmt::Debug for PlotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotConfig")
            .field("title", &self.title)
            .field("render_period_ms", &self.render_period_ms)
            .field("defaults", &self.defaults)
            .field("fit", &self.fit)
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl PlotConfig {
    /// Read a config file; the format is picked from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        let cfg = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        Ok(cfg.validated())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        Ok(cfg.validated())
    }

    /// Clamp every field into its supported range.
    pub fn validated(mut self) -> Self {
        self.render_period_ms = self.render_period_ms.max(1);
        self.defaults = self.defaults.clamped();
        self.fit = self.fit.validated();
        self
    }

    pub fn render_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.render_period_ms.max(1))
    }
}
