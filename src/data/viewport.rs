//! Visible range computation: global X extent plus scrollbar position to an
//! (X range, Y range) pair.

use crate::data::curve::Curve;

/// Scrollbar maximum whenever scrolling is possible.
pub const SLIDER_MAX: i32 = 1000;

pub const DEFAULT_RANGE: (f64, f64) = (0.0, 1.0);

/// Visible window as a fraction of the global span.
const WINDOW_FRACTION: f64 = 0.20;
const MIN_WINDOW_FRACTION: f64 = 1.0 / 50.0;
/// Vertical padding as a fraction of the visible Y span.
const Y_PADDING: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scrollbar {
    /// `0` when scrolling is impossible, else [`SLIDER_MAX`].
    pub max: i32,
    pub value: i32,
}

/// Why the viewport is being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Render tick: follow the newest data when pinned, hold still when not.
    FollowData,
    /// The scrollbar moved; map its value to a start position.
    UserScroll,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    pinned_to_right: bool,
    view_x: (f64, f64),
    y_range: (f64, f64),
    window_span: f64,
    scrollbar: Scrollbar,
    has_data: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pinned_to_right: true,
            view_x: DEFAULT_RANGE,
            y_range: DEFAULT_RANGE,
            window_span: 1.0,
            scrollbar: Scrollbar::default(),
            has_data: false,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pinned_to_right(&self) -> bool {
        self.pinned_to_right
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.view_x
    }

    /// Displayed Y range, padding included.
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    pub fn window_span(&self) -> f64 {
        self.window_span
    }

    pub fn scrollbar(&self) -> Scrollbar {
        self.scrollbar
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Back to the empty state: pinned right, unit ranges, no scrolling.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// User moved the scrollbar to `value`.
    pub fn scroll_to(&mut self, value: i32, curves: &[Curve]) {
        let max = self.scrollbar.max;
        self.scrollbar.value = value.clamp(0, max.max(0));
        self.pinned_to_right = max <= 0 || self.scrollbar.value >= max;
        self.refresh(curves, Refresh::UserScroll);
    }

    pub fn refresh(&mut self, curves: &[Curve], mode: Refresh) {
        let Some((gx0, gx1)) = global_x_extent(curves) else {
            let pinned = self.pinned_to_right;
            self.reset();
            self.pinned_to_right = pinned;
            return;
        };

        let mut span = gx1 - gx0;
        if span <= 0.0 {
            span = 1.0;
        }
        let window = if span <= 1e-9 {
            1.0
        } else {
            (span * WINDOW_FRACTION).max(span * MIN_WINDOW_FRACTION)
        };
        self.window_span = span.min(window);

        let max_start = gx1 - self.window_span;
        let can_scroll = max_start > gx0 + 1e-12;
        self.scrollbar.max = if can_scroll { SLIDER_MAX } else { 0 };
        self.scrollbar.value = self.scrollbar.value.clamp(0, self.scrollbar.max);

        let follow = mode == Refresh::FollowData;
        let hold = follow && !self.pinned_to_right && self.has_data && can_scroll;

        let (start, end) = if hold {
            // Keep the held width but never let it slide off the retained data.
            let (held_start, held_end) = self.view_x;
            let start = held_start.clamp(gx0, max_start);
            let end = held_end + (start - held_start);
            let t = (start - gx0) / (max_start - gx0);
            self.scrollbar.value = (t * f64::from(SLIDER_MAX)).round().clamp(0.0, f64::from(SLIDER_MAX)) as i32;
            (start, end)
        } else {
            if follow && self.pinned_to_right && can_scroll {
                self.scrollbar.value = self.scrollbar.max;
            }
            let start = if self.scrollbar.max > 0 {
                let t = f64::from(self.scrollbar.value) / f64::from(self.scrollbar.max);
                gx0 + t * (max_start - gx0)
            } else {
                gx0
            };
            let mut end = start + self.window_span;
            if end < start + 1e-9 {
                end = start + 1.0;
            }
            (start, end)
        };

        self.view_x = (start, end);
        self.y_range = padded_y_range(curves, start, end);
        self.has_data = true;
    }

    /// Human-readable visible range, e.g. `X:[12.5, 30]`.
    pub fn range_label(&self) -> String {
        if !self.has_data {
            return "No data".to_string();
        }
        format!(
            "X:[{}, {}]",
            format_sig(self.view_x.0, 6),
            format_sig(self.view_x.1, 6)
        )
    }
}

/// Min/max X over every curve's buffer, `None` when all are empty.
pub fn global_x_extent(curves: &[Curve]) -> Option<(f64, f64)> {
    curves
        .iter()
        .filter_map(Curve::x_extent)
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
}

fn padded_y_range(curves: &[Curve], x0: f64, x1: f64) -> (f64, f64) {
    let (y0, y1) = curves
        .iter()
        .flat_map(|c| c.points().iter())
        .filter(|p| p[0] >= x0 && p[0] <= x1)
        .fold(None, |acc: Option<(f64, f64)>, p| match acc {
            None => Some((p[1], p[1])),
            Some((lo, hi)) => Some((lo.min(p[1]), hi.max(p[1]))),
        })
        .unwrap_or(DEFAULT_RANGE);

    let mut span = y1 - y0;
    if span <= 1e-12 {
        span = 1.0;
    }
    let pad = span * Y_PADDING;
    (y0 - pad, y1 + pad)
}

/// `%g`-style formatting with `sig` significant digits, e.g. `1.23457e+06`.
pub fn format_sig(v: f64, sig: usize) -> String {
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }
    let sig = sig.max(1);
    // The exponent after rounding decides the notation, so 999999.5 becomes 1e+06.
    let sci = format!("{:.*e}", sig - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= sig as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, v)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
