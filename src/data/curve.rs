//! A single plotted curve: settings, rolling sample buffer and its three
//! renderable series.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::data::color::Rgb;

/// Channel id as routed by the `CH:<n>` token.
pub type ChannelId = u32;

pub const MIN_FIT_WINDOW: usize = 20;
pub const MAX_FIT_WINDOW: usize = 200_000;
pub const MIN_MAX_POINTS: usize = 100;
pub const MAX_MAX_POINTS: usize = 2_000_000;

pub const LINE_WIDTH: f32 = 1.6;
pub const FIT_WIDTH: f32 = 2.2;
pub const MARKER_SIZE: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    Points,
    #[default]
    Lines,
    Fit,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Points, RenderMode::Lines, RenderMode::Fit];

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Points => "Points",
            RenderMode::Lines => "Lines",
            RenderMode::Fit => "Fit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FitType {
    #[default]
    None,
    Sine,
    Triangle,
    Square,
}

impl FitType {
    pub const ALL: [FitType; 4] = [FitType::None, FitType::Sine, FitType::Triangle, FitType::Square];

    pub fn label(self) -> &'static str {
        match self {
            FitType::None => "None",
            FitType::Sine => "Sine",
            FitType::Triangle => "Triangle",
            FitType::Square => "Square",
        }
    }
}

/// User-adjustable per-curve settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    pub render_mode: RenderMode,
    pub fit_type: FitType,
    pub show_raw_points_in_fit: bool,
    /// Most-recent samples considered for fitting.
    pub fit_window: usize,
    /// Rolling buffer capacity.
    pub max_points: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Lines,
            fit_type: FitType::None,
            show_raw_points_in_fit: true,
            fit_window: 200,
            max_points: 2000,
        }
    }
}

impl CurveSettings {
    /// Clamp window and capacity into their supported ranges.
    pub fn clamped(mut self) -> Self {
        self.fit_window = self.fit_window.clamp(MIN_FIT_WINDOW, MAX_FIT_WINDOW);
        self.max_points = self.max_points.clamp(MIN_MAX_POINTS, MAX_MAX_POINTS);
        self
    }
}

/// One renderable primitive (scatter, polyline or fit line).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub name: String,
    pub visible: bool,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    fn named(name: String) -> Self {
        Self {
            name,
            visible: false,
            points: Vec::new(),
        }
    }

    fn replace<I: IntoIterator<Item = [f64; 2]>>(&mut self, points: I) {
        self.points.clear();
        self.points.extend(points);
    }
}

/// The three series every curve owns for its whole lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSeries {
    pub scatter: Series,
    pub line: Series,
    pub fit: Series,
}

impl CurveSeries {
    fn for_curve(name: &str) -> Self {
        Self {
            scatter: Series::named(format!("{name} (pts)")),
            line: Series::named(name.to_string()),
            fit: Series::named(format!("{name} (fit)")),
        }
    }

    fn apply_visibility(&mut self, settings: &CurveSettings) {
        match settings.render_mode {
            RenderMode::Points => {
                self.scatter.visible = true;
                self.line.visible = false;
                self.fit.visible = false;
            }
            RenderMode::Lines => {
                self.scatter.visible = false;
                self.line.visible = true;
                self.fit.visible = false;
            }
            RenderMode::Fit => {
                self.scatter.visible = settings.show_raw_points_in_fit;
                self.line.visible = false;
                self.fit.visible = settings.fit_type != FitType::None;
            }
        }
    }

    fn clear(&mut self) {
        self.scatter.points.clear();
        self.line.points.clear();
        self.fit.points.clear();
    }
}

#[derive(Debug, Clone)]
pub struct Curve {
    pub channel_id: ChannelId,
    pub name: String,
    pub color: Rgb,
    pub settings: CurveSettings,
    points: VecDeque<[f64; 2]>,
    series: CurveSeries,
}

impl Curve {
    pub fn new(channel_id: ChannelId, color: Rgb, settings: CurveSettings) -> Self {
        let name = format!("CH:{channel_id}");
        let mut series = CurveSeries::for_curve(&name);
        let settings = settings.clamped();
        series.apply_visibility(&settings);
        Self {
            channel_id,
            name,
            color,
            settings,
            points: VecDeque::new(),
            series,
        }
    }

    pub fn points(&self) -> &VecDeque<[f64; 2]> {
        &self.points
    }

    pub fn series(&self) -> &CurveSeries {
        &self.series
    }

    pub fn effective_max_points(&self) -> usize {
        self.settings.max_points.max(MIN_MAX_POINTS)
    }

    pub fn effective_fit_window(&self) -> usize {
        self.settings.fit_window.max(MIN_FIT_WINDOW)
    }

    /// Append a sample, dropping the oldest ones beyond capacity.
    pub fn push(&mut self, point: [f64; 2]) {
        self.points.push_back(point);
        self.prune_by_points(self.effective_max_points());
    }

    pub fn prune_by_points(&mut self, max_points: usize) {
        while self.points.len() > max_points {
            self.points.pop_front();
        }
    }

    pub fn set_settings(&mut self, settings: CurveSettings) {
        self.settings = settings.clamped();
        self.prune_by_points(self.effective_max_points());
        self.series.apply_visibility(&self.settings);
    }

    /// Drop all samples and everything derived from them.
    pub fn clear_all(&mut self) {
        self.points.clear();
        self.series.clear();
    }

    /// Min/max X over the current buffer.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p[0], p[0])),
            Some((lo, hi)) => Some((lo.min(p[0]), hi.max(p[0]))),
        })
    }

    /// Copy the raw buffer into the series the render mode shows and empty
    /// the hidden ones.
    pub(crate) fn push_raw_series(&mut self) {
        self.series.apply_visibility(&self.settings);
        let pts = &self.points;
        match self.settings.render_mode {
            RenderMode::Points => {
                self.series.scatter.replace(pts.iter().copied());
                self.series.line.points.clear();
            }
            RenderMode::Lines => {
                self.series.line.replace(pts.iter().copied());
                self.series.scatter.points.clear();
            }
            RenderMode::Fit => {
                if self.settings.show_raw_points_in_fit {
                    self.series.scatter.replace(pts.iter().copied());
                } else {
                    self.series.scatter.points.clear();
                }
                self.series.line.points.clear();
            }
        }
    }

    pub(crate) fn set_fit_series(&mut self, points: Vec<[f64; 2]>) {
        self.series.fit.points = points;
    }
}
