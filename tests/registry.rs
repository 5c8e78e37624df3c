use waveplot::data::color::default_color_for_index;
use waveplot::data::curve::{CurveSettings, FitType, RenderMode};
use waveplot::data::registry::CurveRegistry;

fn registry() -> CurveRegistry {
    let mut r = CurveRegistry::new(CurveSettings::default());
    r.ensure_curve(0);
    r
}

#[test]
fn ensure_curve_is_idempotent() {
    let mut r = registry();
    let a = r.ensure_curve(4);
    let b = r.ensure_curve(4);
    assert_eq!(a, b);
    assert_eq!(r.len(), 2);
    assert_eq!(r.curves()[a].name, "CH:4");
}

#[test]
fn new_curves_get_distinct_colors() {
    let mut r = registry();
    for ch in 1..7 {
        r.ensure_curve(ch);
    }
    let colors: Vec<_> = r.curves().iter().map(|c| c.color).collect();
    for (i, a) in colors.iter().enumerate() {
        assert_eq!(*a, default_color_for_index(i));
        for b in &colors[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn new_curves_copy_active_settings() {
    let mut r = registry();
    let mut s = r.curves()[0].settings;
    s.render_mode = RenderMode::Fit;
    s.fit_type = FitType::Square;
    s.fit_window = 50;
    if let Some(c) = r.active_mut() {
        c.set_settings(s);
    }
    let i = r.ensure_curve(9);
    assert_eq!(r.curves()[i].settings, s);
}

#[test]
fn capacity_keeps_most_recent_points() {
    let mut r = registry();
    let cap = r.curves()[0].effective_max_points();
    for i in 0..cap + 50 {
        r.append(Some(0), [i as f64, 0.0]);
    }
    let pts = r.curves()[0].points();
    assert_eq!(pts.len(), cap);
    assert_eq!(pts.back(), Some(&[(cap + 49) as f64, 0.0]));
    assert_eq!(pts.front(), Some(&[50.0, 0.0]));
}

#[test]
fn points_without_channel_go_to_active_curve() {
    let mut r = registry();
    let one = r.ensure_curve(1);
    r.set_active(one);
    r.append(None, [1.0, 2.0]);
    assert_eq!(r.curves()[one].points().len(), 1);
    assert!(r.curves()[0].points().is_empty());
}

#[test]
fn add_curve_uses_lowest_unused_id() {
    let mut r = registry();
    r.ensure_curve(1);
    r.ensure_curve(3);
    let i = r.add_curve();
    assert_eq!(r.curves()[i].channel_id, 2);
    assert_eq!(r.active_index(), i);
}

#[test]
fn last_curve_cannot_be_removed() {
    let mut r = registry();
    assert!(r.remove(0).is_none());
    assert_eq!(r.len(), 1);
}

#[test]
fn removal_keeps_active_curve_when_possible() {
    let mut r = registry();
    r.ensure_curve(1);
    let two = r.ensure_curve(2);
    r.set_active(two);
    assert!(r.remove(0).is_some());
    assert_eq!(r.active().map(|c| c.channel_id), Some(2));

    // removing the active last curve falls back to the new last one
    let last = r.active_index();
    r.remove(last);
    assert_eq!(r.active().map(|c| c.channel_id), Some(1));
}
