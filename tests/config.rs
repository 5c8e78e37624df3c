use std::io::Write;

use waveplot::config::{ConfigError, FitConfig, PlotConfig};
use waveplot::{FitType, RenderMode};

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("waveplot-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn defaults() {
    let cfg = PlotConfig::default();
    assert_eq!(cfg.title, "Waveform Plot");
    assert_eq!(cfg.render_period_ms, 33);
    assert_eq!(cfg.defaults.render_mode, RenderMode::Lines);
    assert_eq!(cfg.defaults.fit_type, FitType::None);
    assert!(cfg.defaults.show_raw_points_in_fit);
    assert_eq!(cfg.defaults.fit_window, 200);
    assert_eq!(cfg.defaults.max_points, 2000);
    assert_eq!(cfg.fit, FitConfig::default());
    assert!(cfg.events.is_none());
}

#[test]
fn yaml_partial_config_is_validated() {
    let cfg = PlotConfig::from_yaml_str(
        "title: Bench\nrender_period_ms: 0\ndefaults:\n  render_mode: Fit\n  fit_type: Square\n  fit_window: 5\nfit:\n  samples: 1\n",
    )
    .unwrap();
    assert_eq!(cfg.title, "Bench");
    assert_eq!(cfg.render_period_ms, 1);
    assert_eq!(cfg.defaults.render_mode, RenderMode::Fit);
    assert_eq!(cfg.defaults.fit_type, FitType::Square);
    assert_eq!(cfg.defaults.fit_window, 20);
    assert_eq!(cfg.defaults.max_points, 2000);
    assert_eq!(cfg.fit.samples, 2);
}

#[test]
fn duty_bounds_are_ordered() {
    let fit = FitConfig {
        samples: 400,
        duty_min: 0.9,
        duty_max: 0.2,
    }
    .validated();
    assert!(fit.duty_min <= fit.duty_max);
}

#[test]
fn load_by_extension() {
    let yaml = temp_file("plot.yaml", "title: From YAML\n");
    assert_eq!(PlotConfig::load(&yaml).unwrap().title, "From YAML");

    let json = temp_file("plot.json", r#"{"title": "From JSON", "fit": {"duty_min": 0.1}}"#);
    let cfg = PlotConfig::load(&json).unwrap();
    assert_eq!(cfg.title, "From JSON");
    assert_eq!(cfg.fit.duty_min, 0.1);
    assert_eq!(cfg.fit.duty_max, 0.95);

    let toml = temp_file("plot.toml", "title = 'x'");
    assert!(matches!(PlotConfig::load(&toml), Err(ConfigError::UnsupportedFormat(_))));
}

#[test]
fn load_errors() {
    let missing = std::env::temp_dir().join("waveplot-definitely-missing.yaml");
    assert!(matches!(PlotConfig::load(&missing), Err(ConfigError::Io(_))));

    let bad = temp_file("bad.json", "{ not json");
    assert!(matches!(PlotConfig::load(&bad), Err(ConfigError::Json(_))));
}
