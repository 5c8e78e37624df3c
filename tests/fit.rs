use std::collections::VecDeque;
use std::f64::consts::PI;

use waveplot::config::FitConfig;
use waveplot::data::color::Rgb;
use waveplot::data::curve::{Curve, CurveSettings, FitType, RenderMode};
use waveplot::data::fit::{
    compute_fit_curve, fit_model, fit_sine, fit_square, fit_triangle, select_fit_window,
    TriangleModel, MIN_FIT_POINTS,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn sine_points() -> Vec<[f64; 2]> {
    // maxima land exactly on samples i = 50, 250, 450
    (0..600)
        .map(|i| {
            let x = i as f64 * PI / 200.0;
            [x, 3.0 * (2.0 * x).sin() + 1.0]
        })
        .collect()
}

fn square_points(high_at: impl Fn(usize) -> bool) -> Vec<[f64; 2]> {
    (0..600)
        .map(|i| {
            let y = if high_at(i) { 2.0 } else { -1.0 };
            [i as f64 * 0.1, y]
        })
        .collect()
}

#[test]
fn sine_fit_recovers_parameters() {
    let pts = sine_points();
    let range = (pts[0][0], pts[pts.len() - 1][0]);
    let m = fit_sine(&pts, range).expect("sine fit");
    assert!(close(m.omega, 2.0, 0.1), "omega {}", m.omega);
    assert!(close(m.a, 3.0, 0.15), "a {}", m.a);
    assert!(close(m.b, 0.0, 0.15), "b {}", m.b);
    assert!(close(m.c, 1.0, 0.05), "c {}", m.c);
    assert!(close(m.amplitude(), 3.0, 0.15));
}

#[test]
fn sine_fit_needs_twenty_points() {
    let pts: Vec<[f64; 2]> = sine_points().into_iter().take(MIN_FIT_POINTS - 1).collect();
    assert!(fit_sine(&pts, (0.0, 1.0)).is_none());
}

#[test]
fn triangle_fit_recovers_shape() {
    let truth = TriangleModel {
        amplitude: 2.0,
        offset: 1.0,
        period: 4.0,
        origin: 0.0,
    };
    let pts: Vec<[f64; 2]> = (0..400)
        .map(|i| {
            let x = i as f64 * 0.05;
            [x, truth.eval(x)]
        })
        .collect();
    let m = fit_triangle(&pts, (0.0, 20.0)).expect("triangle fit");
    assert!(close(m.amplitude, 2.0, 1e-6));
    assert!(close(m.offset, 1.0, 1e-6));
    assert!(close(m.period, 4.0, 1e-6), "period {}", m.period);
    assert_eq!(m.origin, 0.0);
}

#[test]
fn triangle_falls_back_to_visible_span() {
    // a single ramp has no maxima to measure
    let pts: Vec<[f64; 2]> = (0..30).map(|i| [i as f64, i as f64]).collect();
    let m = fit_triangle(&pts, (0.0, 29.0)).expect("triangle fit");
    assert_eq!(m.period, 29.0);
}

#[test]
fn square_fit_recovers_levels_and_period() {
    let pts = square_points(|i| i % 100 < 50);
    let m = fit_square(&pts, (0.0, 59.9), (0.05, 0.95)).expect("square fit");
    assert!(close(m.high, 2.0, 1e-9));
    assert!(close(m.low, -1.0, 1e-9));
    assert!(close(m.period, 10.0, 1e-6), "period {}", m.period);
    assert!(close(m.duty, 0.5, 1e-9));
}

#[test]
fn square_duty_is_clamped() {
    let mostly_low = square_points(|i| i == 300);
    let m = fit_square(&mostly_low, (0.0, 59.9), (0.05, 0.95)).expect("square fit");
    assert_eq!(m.duty, 0.05);

    let mostly_high = square_points(|i| i != 300);
    let m = fit_square(&mostly_high, (0.0, 59.9), (0.05, 0.95)).expect("square fit");
    assert_eq!(m.duty, 0.95);
}

#[test]
fn degenerate_range_gives_no_fit() {
    let pts: Vec<[f64; 2]> = (0..30).map(|_| [0.0, 1.0]).collect();
    assert!(fit_triangle(&pts, (0.0, 0.0)).is_none());
    assert!(fit_sine(&pts, (0.0, 0.0)).is_none());
    assert!(fit_square(&pts, (0.0, 0.0), (0.05, 0.95)).is_none());
}

#[test]
fn fit_type_none_has_no_model() {
    let pts = sine_points();
    assert!(fit_model(FitType::None, &pts, (0.0, 9.0), &FitConfig::default()).is_none());
}

#[test]
fn window_prefers_visible_points() {
    let pts: VecDeque<[f64; 2]> = (0..100).map(|i| [i as f64, 0.0]).collect();
    let w = select_fit_window(&pts, 50, (60.0, 99.0));
    assert_eq!(w.len(), 40);
    assert_eq!(w[0][0], 60.0);

    // too few visible points: whole recent window
    let w = select_fit_window(&pts, 50, (95.0, 99.0));
    assert_eq!(w.len(), 50);
    assert_eq!(w[0][0], 50.0);

    let short: VecDeque<[f64; 2]> = (0..10).map(|i| [i as f64, 0.0]).collect();
    assert!(select_fit_window(&short, 200, (0.0, 10.0)).is_empty());
}

#[test]
fn fit_curve_is_sampled_across_visible_range() {
    let mut settings = CurveSettings::default();
    settings.render_mode = RenderMode::Fit;
    settings.fit_type = FitType::Sine;
    settings.fit_window = 600;
    let mut curve = Curve::new(0, Rgb::new(0, 0, 0), settings);
    for p in sine_points() {
        curve.push(p);
    }
    let cfg = FitConfig::default();
    // wide enough to hold several maxima
    let range = (0.5, 8.5);
    let out = compute_fit_curve(&curve, range, &cfg);
    assert_eq!(out.len(), cfg.samples);
    assert_eq!(out[0][0], 0.5);
    assert_eq!(out[out.len() - 1][0], 8.5);
    let mid = out[out.len() / 2];
    assert!(close(mid[1], 3.0 * (2.0 * mid[0]).sin() + 1.0, 0.2));
}

#[test]
fn fit_curve_empty_for_short_buffer() {
    let mut settings = CurveSettings::default();
    settings.fit_type = FitType::Square;
    let mut curve = Curve::new(0, Rgb::new(0, 0, 0), settings);
    for i in 0..10 {
        curve.push([i as f64, 1.0]);
    }
    assert!(compute_fit_curve(&curve, (0.0, 9.0), &FitConfig::default()).is_empty());
}
