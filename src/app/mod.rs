//! egui front end: a thin adapter that feeds the line channel into
//! [`PlotEngine`](crate::engine::PlotEngine), drives its render tick and draws
//! what the engine produced.

mod controls;
mod plot_view;
mod run;

pub use run::run_plot;

use std::sync::mpsc::Receiver;
use std::time::Instant;

use egui::Color32;

use crate::config::PlotConfig;
use crate::data::color::Rgb;
use crate::engine::{PlotEngine, RenderScheduler};
use crate::sink::PlotCommand;

pub struct PlotApp {
    pub engine: PlotEngine,
    rx: Receiver<PlotCommand>,
    scheduler: RenderScheduler,
}

impl PlotApp {
    pub fn new(rx: Receiver<PlotCommand>, cfg: &PlotConfig) -> Self {
        Self {
            engine: PlotEngine::new(cfg),
            rx,
            scheduler: RenderScheduler::new(cfg.render_period()),
        }
    }

    /// Hand every queued command to the engine. Never blocks.
    fn drain_commands(&mut self) -> usize {
        let mut n = 0;
        while let Ok(cmd) = self.rx.try_recv() {
            self.engine.process_command(cmd);
            n += 1;
        }
        n
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let received = self.drain_commands();
        if received > 0 {
            tracing::trace!(received, "commands drained");
        }

        let now = Instant::now();
        if self.scheduler.due(now) {
            self.engine.tick();
        }

        egui::SidePanel::left("waveplot_controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    controls::show(ui, &mut self.engine);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot_view::show(ui, &mut self.engine);
        });

        ctx.request_repaint_after(self.scheduler.time_until_next(Instant::now()));
    }
}

pub(crate) fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r(), c.g(), c.b())
}
