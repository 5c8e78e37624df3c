//! Native window entry point.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::PlotConfig;
use crate::sink::PlotCommand;

use super::PlotApp;

/// Open the plot window and block until it is closed.
///
/// Lines arrive on `rx` from any producer thread (see
/// [`channel_lines`](crate::sink::channel_lines)).
pub fn run_plot(rx: Receiver<PlotCommand>, cfg: PlotConfig) -> eframe::Result<()> {
    let cfg = cfg.validated();
    let app = PlotApp::new(rx, &cfg);
    tracing::info!(title = %cfg.title, period_ms = cfg.render_period_ms, "starting plot window");

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 760.0)),
        ..Default::default()
    };

    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
