//! Piecewise waveforms: triangle and square.
//!
//! Both are phase-anchored at the start of the visible X range, so the
//! rendered shape is deterministic for a given window and visible range.

use super::{estimate_period_from_maxima, y_min_max, MIN_FIT_POINTS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleModel {
    pub amplitude: f64,
    pub offset: f64,
    pub period: f64,
    /// X where phase is zero (waveform at `offset`, rising).
    pub origin: f64,
}

impl TriangleModel {
    pub fn eval(&self, x: f64) -> f64 {
        let ph = ((x - self.origin) / self.period).rem_euclid(1.0);
        let v = if ph < 0.25 {
            ph * 4.0
        } else if ph < 0.75 {
            2.0 - ph * 4.0
        } else {
            ph * 4.0 - 4.0
        };
        self.offset + self.amplitude * v
    }
}

pub fn fit_triangle(pts: &[[f64; 2]], x_range: (f64, f64)) -> Option<TriangleModel> {
    if pts.len() < MIN_FIT_POINTS {
        return None;
    }
    let (ymin, ymax) = y_min_max(pts)?;

    let mut period = estimate_period_from_maxima(pts);
    if period <= 1e-12 {
        period = x_range.1 - x_range.0;
    }
    if period <= 1e-12 {
        return None;
    }

    Some(TriangleModel {
        amplitude: 0.5 * (ymax - ymin),
        offset: 0.5 * (ymax + ymin),
        period,
        origin: x_range.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareModel {
    pub high: f64,
    pub low: f64,
    pub period: f64,
    /// Fraction of each period spent at `high`.
    pub duty: f64,
    /// X where the high phase starts.
    pub origin: f64,
}

impl SquareModel {
    pub fn eval(&self, x: f64) -> f64 {
        let ph = ((x - self.origin) / self.period).rem_euclid(1.0);
        if ph < self.duty {
            self.high
        } else {
            self.low
        }
    }
}

/// Fit a two-level step waveform.
///
/// Samples at or above the mid-range threshold count as high. The duty cycle
/// is clamped into `duty_bounds`.
pub fn fit_square(
    pts: &[[f64; 2]],
    x_range: (f64, f64),
    duty_bounds: (f64, f64),
) -> Option<SquareModel> {
    if pts.len() < MIN_FIT_POINTS {
        return None;
    }
    let (ymin, ymax) = y_min_max(pts)?;
    let threshold = 0.5 * (ymax + ymin);

    let (mut sum_hi, mut sum_lo) = (0.0, 0.0);
    let (mut cnt_hi, mut cnt_lo) = (0usize, 0usize);
    let mut rising_xs = Vec::new();
    let mut prev_high = pts[0][1] >= threshold;
    for p in pts {
        let high = p[1] >= threshold;
        if high {
            sum_hi += p[1];
            cnt_hi += 1;
        } else {
            sum_lo += p[1];
            cnt_lo += 1;
        }
        if !prev_high && high {
            rising_xs.push(p[0]);
        }
        prev_high = high;
    }

    let high = if cnt_hi > 0 { sum_hi / cnt_hi as f64 } else { ymax };
    let low = if cnt_lo > 0 { sum_lo / cnt_lo as f64 } else { ymin };

    let mut period = mean_positive_spacing(&rising_xs).unwrap_or(0.0);
    if period <= 1e-12 {
        period = x_range.1 - x_range.0;
    }
    if period <= 1e-12 {
        return None;
    }

    let (duty_min, duty_max) = duty_bounds;
    let duty = (cnt_hi as f64 / pts.len() as f64).max(duty_min).min(duty_max);

    Some(SquareModel {
        high,
        low,
        period,
        duty,
        origin: x_range.0,
    })
}

/// Mean of the positive gaps between successive values.
pub(super) fn mean_positive_spacing(xs: &[f64]) -> Option<f64> {
    let gaps: Vec<f64> = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > 0.0)
        .collect();
    if gaps.is_empty() {
        None
    } else {
        Some(gaps.iter().sum::<f64>() / gaps.len() as f64)
    }
}
