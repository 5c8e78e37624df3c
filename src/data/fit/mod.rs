//! Waveform fitting over the recent window of a curve.
//!
//! Every fit is best effort: too few samples, a singular system or a
//! non-positive period estimate all yield no model (an empty fit series)
//! rather than an error.

mod shapes;
mod sine;

pub use shapes::{fit_square, fit_triangle, SquareModel, TriangleModel};
pub use sine::{fit_sine, SineModel};

use std::collections::VecDeque;

use crate::config::FitConfig;
use crate::data::curve::{Curve, FitType};

/// Fewer usable samples than this produce no fit.
pub const MIN_FIT_POINTS: usize = 20;

/// Peak detection needs at least this many samples to be meaningful.
const MIN_PEAK_SEARCH_POINTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitModel {
    Sine(SineModel),
    Triangle(TriangleModel),
    Square(SquareModel),
}

impl FitModel {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            FitModel::Sine(m) => m.eval(x),
            FitModel::Triangle(m) => m.eval(x),
            FitModel::Square(m) => m.eval(x),
        }
    }

    /// `samples` evenly spaced points across `x_range`, both ends included.
    pub fn sample(&self, x_range: (f64, f64), samples: usize) -> Vec<[f64; 2]> {
        let samples = samples.max(2);
        let (x0, x1) = x_range;
        (0..samples)
            .map(|i| {
                let t = i as f64 / (samples - 1) as f64;
                let x = x0 + t * (x1 - x0);
                [x, self.eval(x)]
            })
            .collect()
    }
}

/// Fit `fit_type` to `pts`; `x_range` is the visible X range the result is
/// rendered across.
pub fn fit_model(
    fit_type: FitType,
    pts: &[[f64; 2]],
    x_range: (f64, f64),
    cfg: &FitConfig,
) -> Option<FitModel> {
    match fit_type {
        FitType::None => None,
        FitType::Sine => fit_sine(pts, x_range).map(FitModel::Sine),
        FitType::Triangle => fit_triangle(pts, x_range).map(FitModel::Triangle),
        FitType::Square => {
            fit_square(pts, x_range, (cfg.duty_min, cfg.duty_max)).map(FitModel::Square)
        }
    }
}

/// The samples a fit is computed from.
///
/// Takes the most recent `max(20, fit_window)` points and narrows them to the
/// visible range when at least 20 remain. Returns an empty vector when the
/// window itself is shorter than 20.
pub fn select_fit_window(
    points: &VecDeque<[f64; 2]>,
    fit_window: usize,
    x_range: (f64, f64),
) -> Vec<[f64; 2]> {
    let n = fit_window.max(MIN_FIT_POINTS);
    let skip = points.len().saturating_sub(n);
    let window: Vec<[f64; 2]> = points.iter().skip(skip).copied().collect();
    if window.len() < MIN_FIT_POINTS {
        return Vec::new();
    }

    let in_range: Vec<[f64; 2]> = window
        .iter()
        .copied()
        .filter(|p| p[0] >= x_range.0 && p[0] <= x_range.1)
        .collect();
    if in_range.len() >= MIN_FIT_POINTS {
        in_range
    } else {
        window
    }
}

/// Sampled fit line for a curve across the visible range; empty when the
/// curve has no fit type or the fit is infeasible.
pub fn compute_fit_curve(curve: &Curve, x_range: (f64, f64), cfg: &FitConfig) -> Vec<[f64; 2]> {
    if curve.settings.fit_type == FitType::None {
        return Vec::new();
    }
    let window = select_fit_window(curve.points(), curve.effective_fit_window(), x_range);
    match fit_model(curve.settings.fit_type, &window, x_range, cfg) {
        Some(model) => model.sample(x_range, cfg.samples),
        None => {
            tracing::debug!(
                curve = %curve.name,
                fit = curve.settings.fit_type.label(),
                samples = window.len(),
                "fit infeasible"
            );
            Vec::new()
        }
    }
}

/// Mean spacing between successive strict local maxima; `0.0` when fewer
/// than two maxima exist.
pub fn estimate_period_from_maxima(pts: &[[f64; 2]]) -> f64 {
    if pts.len() < MIN_PEAK_SEARCH_POINTS {
        return 0.0;
    }
    let peak_xs: Vec<f64> = pts
        .windows(3)
        .filter(|w| w[1][1] > w[0][1] && w[1][1] > w[2][1])
        .map(|w| w[1][0])
        .collect();
    shapes::mean_positive_spacing(&peak_xs).unwrap_or(0.0)
}

fn y_min_max(pts: &[[f64; 2]]) -> Option<(f64, f64)> {
    let first = pts.first()?[1];
    Some(
        pts.iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p[1]), hi.max(p[1]))),
    )
}
