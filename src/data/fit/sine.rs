//! Sine fitting: `y = A·sin(ωx) + B·cos(ωx) + C` by linear least squares for a
//! set of candidate angular frequencies around a peak-spacing estimate.

use std::f64::consts::TAU;

use super::{estimate_period_from_maxima, MIN_FIT_POINTS};

/// Candidates are `ω0·(1 + STEP·k)` for `k` in `-HALF_STEPS..=HALF_STEPS`.
const HALF_STEPS: i32 = 10;
const STEP: f64 = 0.02;

const PIVOT_EPS: f64 = 1e-15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineModel {
    /// Coefficient of `sin(ωx)`.
    pub a: f64,
    /// Coefficient of `cos(ωx)`.
    pub b: f64,
    /// Constant offset.
    pub c: f64,
    /// Angular frequency.
    pub omega: f64,
}

impl SineModel {
    pub fn eval(&self, x: f64) -> f64 {
        let (s, c) = (self.omega * x).sin_cos();
        self.a * s + self.b * c + self.c
    }

    /// Peak amplitude `sqrt(A² + B²)`.
    pub fn amplitude(&self) -> f64 {
        self.a.hypot(self.b)
    }

    pub fn period(&self) -> f64 {
        TAU / self.omega
    }
}

/// Best-SSE sine over the candidate frequency grid, or `None` when every
/// candidate's normal equations are singular.
pub fn fit_sine(pts: &[[f64; 2]], x_range: (f64, f64)) -> Option<SineModel> {
    if pts.len() < MIN_FIT_POINTS {
        return None;
    }
    let span = x_range.1 - x_range.0;
    if span <= 1e-12 {
        return None;
    }

    let mut period = estimate_period_from_maxima(pts);
    if period <= 1e-12 {
        period = span;
    }
    let omega0 = TAU / period;

    let mut best: Option<(SineModel, f64)> = None;
    for k in -HALF_STEPS..=HALF_STEPS {
        let omega = omega0 * (1.0 + STEP * f64::from(k));
        if omega <= 0.0 {
            continue;
        }
        let Some((model, sse)) = fit_at_omega(pts, omega) else {
            continue;
        };
        if best.map_or(true, |(_, best_sse)| sse < best_sse) {
            best = Some((model, sse));
        }
    }
    best.map(|(model, _)| model)
}

/// Solve for `A`, `B`, `C` at a fixed `omega`; returns the model and its SSE.
fn fit_at_omega(pts: &[[f64; 2]], omega: f64) -> Option<(SineModel, f64)> {
    let (mut ss, mut cc, mut sc, mut s1, mut c1) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut ys, mut yc, mut y1) = (0.0, 0.0, 0.0);
    for p in pts {
        let (s, c) = (omega * p[0]).sin_cos();
        let y = p[1];
        ss += s * s;
        cc += c * c;
        sc += s * c;
        s1 += s;
        c1 += c;
        ys += y * s;
        yc += y * c;
        y1 += y;
    }

    let m = [[ss, sc, s1], [sc, cc, c1], [s1, c1, pts.len() as f64]];
    let [a, b, c] = solve3(m, [ys, yc, y1])?;
    let model = SineModel { a, b, c, omega };

    let sse = pts
        .iter()
        .map(|p| {
            let e = p[1] - model.eval(p[0]);
            e * e
        })
        .sum();
    Some((model, sse))
}

/// Gauss-Jordan elimination with partial pivoting on a 3×3 system.
pub(crate) fn solve3(a: [[f64; 3]; 3], b: [f64; 3]) -> Option<[f64; 3]> {
    let mut m = [
        [a[0][0], a[0][1], a[0][2], b[0]],
        [a[1][0], a[1][1], a[1][2], b[1]],
        [a[2][0], a[2][1], a[2][2], b[2]],
    ];

    for col in 0..3 {
        let mut piv = col;
        for r in col + 1..3 {
            if m[r][col].abs() > m[piv][col].abs() {
                piv = r;
            }
        }
        if m[piv][col].abs() < PIVOT_EPS {
            return None;
        }
        m.swap(piv, col);

        let div = m[col][col];
        for k in col..4 {
            m[col][k] /= div;
        }
        for r in 0..3 {
            if r == col {
                continue;
            }
            let f = m[r][col];
            for k in col..4 {
                m[r][k] -= f * m[col][k];
            }
        }
    }
    Some([m[0][3], m[1][3], m[2][3]])
}
