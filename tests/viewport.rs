use waveplot::data::color::Rgb;
use waveplot::data::curve::{Curve, CurveSettings};
use waveplot::data::viewport::{format_sig, global_x_extent, Refresh, Viewport, SLIDER_MAX};

fn curve_with(xs: impl IntoIterator<Item = f64>) -> Curve {
    let mut c = Curve::new(0, Rgb::new(255, 0, 0), CurveSettings::default());
    for x in xs {
        c.push([x, x]);
    }
    c
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_view_uses_defaults() {
    let mut vp = Viewport::new();
    vp.refresh(&[], Refresh::FollowData);
    assert_eq!(vp.x_range(), (0.0, 1.0));
    assert_eq!(vp.y_range(), (0.0, 1.0));
    assert!(vp.pinned_to_right());
    assert_eq!(vp.range_label(), "No data");
    assert!(global_x_extent(&[curve_with([])]).is_none());
}

#[test]
fn window_is_twenty_percent_of_span() {
    let curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    assert!(approx(vp.window_span(), 20.0));
    let (x0, x1) = vp.x_range();
    assert!(approx(x0, 80.0) && approx(x1, 100.0), "{x0} {x1}");
    assert_eq!(vp.scrollbar().max, SLIDER_MAX);
    assert_eq!(vp.scrollbar().value, SLIDER_MAX);
    assert_eq!(vp.range_label(), "X:[80, 100]");
}

#[test]
fn y_range_is_padded_over_visible_points() {
    let curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    let (y0, y1) = vp.y_range();
    assert!((y0 - 78.4).abs() < 1e-9, "{y0}");
    assert!((y1 - 101.6).abs() < 1e-9, "{y1}");
}

#[test]
fn flat_signal_gets_unit_span() {
    let mut c = Curve::new(0, Rgb::new(0, 0, 0), CurveSettings::default());
    for i in 0..10 {
        c.push([f64::from(i), 5.0]);
    }
    let mut vp = Viewport::new();
    vp.refresh(&[c], Refresh::FollowData);
    let (y0, y1) = vp.y_range();
    assert!(approx(y0, 4.92) && approx(y1, 5.08), "{y0} {y1}");
}

#[test]
fn single_point_cannot_scroll() {
    let curves = [curve_with([5.0])];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    assert_eq!(vp.scrollbar().max, 0);
    assert_eq!(vp.scrollbar().value, 0);
    let (x0, x1) = vp.x_range();
    assert!(approx(x0, 5.0));
    assert!(x1 > x0);
}

#[test]
fn pinned_view_follows_new_data() {
    let mut curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    let before = vp.x_range();

    curves[0].push([110.0, 1.0]);
    vp.refresh(&curves, Refresh::FollowData);
    let after = vp.x_range();
    assert!(after.1 > before.1);
    assert!(approx(after.1, 110.0));
    assert!(vp.pinned_to_right());
}

#[test]
fn unpinned_view_holds_until_user_scrolls() {
    let mut curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);

    vp.scroll_to(500, &curves);
    assert!(!vp.pinned_to_right());
    let held = vp.x_range();
    assert!(approx(held.0, 40.0) && approx(held.1, 60.0), "{held:?}");

    curves[0].push([110.0, 1.0]);
    curves[0].push([120.0, 1.0]);
    vp.refresh(&curves, Refresh::FollowData);
    assert_eq!(vp.x_range(), held);
    assert!(!vp.pinned_to_right());

    // dragging to the end re-pins
    vp.scroll_to(SLIDER_MAX, &curves);
    assert!(vp.pinned_to_right());
    assert!(approx(vp.x_range().1, 120.0));
}

#[test]
fn held_view_stays_inside_data_after_eviction() {
    let curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    vp.scroll_to(500, &curves);
    assert!(approx(vp.x_range().0, 40.0));

    // the buffer has rolled over; the held range lies before the oldest sample
    let curves = [curve_with((200..=300).map(f64::from))];
    vp.refresh(&curves, Refresh::FollowData);
    let (x0, x1) = vp.x_range();
    assert!(approx(x0, 200.0) && approx(x1, 220.0), "{:?}", (x0, x1));
    assert_eq!(vp.scrollbar().value, 0);
    assert!(!vp.pinned_to_right());
    assert!(approx(vp.y_range().0, 200.0 - 20.0 * 0.08));
}

#[test]
fn scroll_value_is_clamped() {
    let curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    vp.scroll_to(-20, &curves);
    assert_eq!(vp.scrollbar().value, 0);
    assert!(approx(vp.x_range().0, 0.0));
    vp.scroll_to(5000, &curves);
    assert_eq!(vp.scrollbar().value, SLIDER_MAX);
}

#[test]
fn reset_returns_to_pinned_defaults() {
    let curves = [curve_with((0..=100).map(f64::from))];
    let mut vp = Viewport::new();
    vp.refresh(&curves, Refresh::FollowData);
    vp.scroll_to(0, &curves);
    vp.reset();
    assert!(vp.pinned_to_right());
    assert_eq!(vp.x_range(), (0.0, 1.0));
    assert!(!vp.has_data());
}

#[test]
fn significant_digit_formatting() {
    assert_eq!(format_sig(12.5, 6), "12.5");
    assert_eq!(format_sig(30.0, 6), "30");
    assert_eq!(format_sig(0.0, 6), "0");
    assert_eq!(format_sig(1.0 / 3.0, 6), "0.333333");
    assert_eq!(format_sig(-2.0, 6), "-2");
    assert_eq!(format_sig(1234567.0, 6), "1.23457e+06");
    assert_eq!(format_sig(999999.5, 6), "1e+06");
    assert_eq!(format_sig(999999.4, 6), "999999");
    assert_eq!(format_sig(0.000012345, 6), "1.2345e-05");
    assert_eq!(format_sig(0.0001, 6), "0.0001");
    assert_eq!(format_sig(-2.5e120, 6), "-2.5e+120");
}
