//! Side panel: curve selection, per-curve settings and metadata keys.

use eframe::egui;
use egui_phosphor::regular::{BROOM, PLUS, TRASH};

use crate::data::color::Rgb;
use crate::data::curve::{
    FitType, RenderMode, MAX_FIT_WINDOW, MAX_MAX_POINTS, MIN_FIT_WINDOW, MIN_MAX_POINTS,
};
use crate::engine::PlotEngine;

use super::to_color32;

pub(super) fn show(ui: &mut egui::Ui, engine: &mut PlotEngine) {
    curve_section(ui, engine);
    ui.separator();
    settings_section(ui, engine);
    ui.separator();
    metadata_section(ui, engine);
}

fn curve_section(ui: &mut egui::Ui, engine: &mut PlotEngine) {
    ui.heading("Curves");

    let names: Vec<(String, egui::Color32)> = engine
        .curves()
        .iter()
        .map(|c| (c.name.clone(), to_color32(c.color)))
        .collect();
    let mut active = engine.active_index();
    let selected_text = names
        .get(active)
        .map(|(n, _)| n.clone())
        .unwrap_or_default();

    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("active_curve")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for (i, (name, color)) in names.iter().enumerate() {
                    ui.selectable_value(
                        &mut active,
                        i,
                        egui::RichText::new(name).color(*color),
                    );
                }
            });
        if ui.button(PLUS).on_hover_text("Add curve").clicked() {
            active = engine.add_curve();
        }
        let can_remove = names.len() > 1;
        if ui
            .add_enabled(can_remove, egui::Button::new(TRASH))
            .on_hover_text("Remove curve")
            .clicked()
        {
            engine.remove_curve(active);
            active = engine.active_index();
        }
    });
    if active != engine.active_index() {
        engine.set_active(active);
    }

    if let Some(mut rgb) = engine.registry().active().map(|c| c.color.0) {
        ui.horizontal(|ui| {
            ui.label("Color");
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                engine.set_color(Rgb(rgb));
            }
        });
    }

    if ui.button(format!("{BROOM} Clear all")).clicked() {
        engine.clear_all();
    }
}

fn settings_section(ui: &mut egui::Ui, engine: &mut PlotEngine) {
    let Some(settings) = engine.registry().active().map(|c| c.settings) else {
        return;
    };
    let mut s = settings;

    egui::Grid::new("curve_settings")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Render");
            egui::ComboBox::from_id_salt("render_mode")
                .selected_text(s.render_mode.label())
                .show_ui(ui, |ui| {
                    for mode in RenderMode::ALL {
                        ui.selectable_value(&mut s.render_mode, mode, mode.label());
                    }
                });
            ui.end_row();

            ui.label("Fit");
            ui.add_enabled_ui(s.render_mode == RenderMode::Fit, |ui| {
                egui::ComboBox::from_id_salt("fit_type")
                    .selected_text(s.fit_type.label())
                    .show_ui(ui, |ui| {
                        for fit in FitType::ALL {
                            ui.selectable_value(&mut s.fit_type, fit, fit.label());
                        }
                    });
            });
            ui.end_row();

            ui.label("Raw points");
            ui.checkbox(&mut s.show_raw_points_in_fit, "show under fit");
            ui.end_row();

            ui.label("Fit window");
            ui.add(
                egui::DragValue::new(&mut s.fit_window)
                    .range(MIN_FIT_WINDOW..=MAX_FIT_WINDOW)
                    .speed(1),
            );
            ui.end_row();

            ui.label("Max points");
            ui.add(
                egui::DragValue::new(&mut s.max_points)
                    .range(MIN_MAX_POINTS..=MAX_MAX_POINTS)
                    .speed(10),
            );
            ui.end_row();
        });

    if s.render_mode != settings.render_mode {
        engine.set_render_mode(s.render_mode);
    }
    if s.fit_type != settings.fit_type {
        engine.set_fit_type(s.fit_type);
    }
    if s.show_raw_points_in_fit != settings.show_raw_points_in_fit {
        engine.set_show_raw_points_in_fit(s.show_raw_points_in_fit);
    }
    if s.fit_window != settings.fit_window {
        engine.set_fit_window(s.fit_window);
    }
    if s.max_points != settings.max_points {
        engine.set_max_points(s.max_points);
    }
}

fn metadata_section(ui: &mut egui::Ui, engine: &mut PlotEngine) {
    ui.heading("Metadata");
    let keys: Vec<(String, bool)> = engine
        .metadata()
        .seen_keys()
        .iter()
        .map(|k| (k.clone(), engine.metadata().is_selected(k)))
        .collect();
    if keys.is_empty() {
        ui.weak("No keys yet");
        return;
    }

    for (key, selected) in keys {
        let mut checked = selected;
        if ui.checkbox(&mut checked, &key).changed() {
            if checked {
                engine.select_meta([key.as_str()]);
            } else {
                engine.deselect_meta([key.as_str()]);
            }
        }
    }

    if !engine.meta_display().is_empty() {
        ui.separator();
        ui.monospace(engine.meta_display());
    }
}
