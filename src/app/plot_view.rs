//! Central plot with the horizontal scrollbar and range label underneath.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, Points};

use crate::data::curve::{FIT_WIDTH, LINE_WIDTH, MARKER_SIZE};
use crate::engine::PlotEngine;

use super::to_color32;

pub(super) fn show(ui: &mut egui::Ui, engine: &mut PlotEngine) {
    egui::TopBottomPanel::bottom("waveplot_scrollbar").show_inside(ui, |ui| {
        scrollbar(ui, engine);
    });

    let (x0, x1) = engine.viewport().x_range();
    let (y0, y1) = engine.viewport().y_range();

    Plot::new("waveplot")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x0..=x1);
            plot_ui.set_plot_bounds_y(y0..=y1);

            for curve in engine.curves() {
                let color = to_color32(curve.color);
                let series = curve.series();
                if series.scatter.visible && !series.scatter.points.is_empty() {
                    plot_ui.points(
                        Points::new(&series.scatter.name, series.scatter.points.clone())
                            .radius(MARKER_SIZE * 0.5)
                            .color(color),
                    );
                }
                if series.line.visible && !series.line.points.is_empty() {
                    plot_ui.line(
                        Line::new(&series.line.name, series.line.points.clone())
                            .color(color)
                            .width(LINE_WIDTH),
                    );
                }
                if series.fit.visible && !series.fit.points.is_empty() {
                    plot_ui.line(
                        Line::new(&series.fit.name, series.fit.points.clone())
                            .color(color)
                            .width(FIT_WIDTH),
                    );
                }
            }
        });
}

fn scrollbar(ui: &mut egui::Ui, engine: &mut PlotEngine) {
    let bar = engine.viewport().scrollbar();
    let label = engine.viewport().range_label();
    ui.horizontal(|ui| {
        let mut value = bar.value;
        let slider = egui::Slider::new(&mut value, 0..=bar.max.max(0)).show_value(false);
        let resp = ui.add_enabled(bar.max > 0, slider);
        if resp.changed() {
            engine.scroll_to(value);
        }
        ui.label(label);
    });
}
