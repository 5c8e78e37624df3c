//! The plotting core: line ingestion, UI-driven mutation and the render tick.
//!
//! Everything here runs on one thread. Ingestion and UI actions only mutate
//! state and raise the dirty flag; [`PlotEngine::tick`] is the single place
//! where series, viewport and fits are recomputed, so rendering cost is one
//! pass per tick no matter how fast lines arrive.

use std::time::{Duration, Instant};

use crate::config::{FitConfig, PlotConfig};
use crate::data::color::Rgb;
use crate::data::curve::{ChannelId, Curve, CurveSettings, FitType, RenderMode};
use crate::data::fit::compute_fit_curve;
use crate::data::metadata::MetadataStore;
use crate::data::parser::{parse_line, ParsedLine};
use crate::data::registry::CurveRegistry;
use crate::data::viewport::{Refresh, Viewport};
use crate::events::{CurveMeta, EventController, EventKind, MetaMeta, PlotEvent, ViewMeta};
use crate::sink::PlotCommand;

pub struct PlotEngine {
    registry: CurveRegistry,
    metadata: MetadataStore,
    meta_display: String,
    viewport: Viewport,
    dirty: bool,
    fit_cfg: FitConfig,
    events: Option<EventController>,
}

impl PlotEngine {
    /// New engine with the default `CH:0` curve active.
    pub fn new(cfg: &PlotConfig) -> Self {
        let cfg = cfg.clone().validated();
        let mut engine = Self {
            registry: CurveRegistry::new(cfg.defaults),
            metadata: MetadataStore::new(),
            meta_display: String::new(),
            viewport: Viewport::new(),
            dirty: false,
            fit_cfg: cfg.fit,
            events: cfg.events,
        };
        engine.ensure_curve(0);
        engine.registry.set_active(0);
        engine
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn curves(&self) -> &[Curve] {
        self.registry.curves()
    }

    pub fn registry(&self) -> &CurveRegistry {
        &self.registry
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }

    /// Sorted `key=value` summary of the selected metadata keys.
    pub fn meta_display(&self) -> &str {
        &self.meta_display
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn active_index(&self) -> usize {
        self.registry.active_index()
    }

    // ── Ingestion ───────────────────────────────────────────────────────

    pub fn process_command(&mut self, cmd: PlotCommand) {
        match cmd {
            PlotCommand::Line(line) => self.ingest_line(&line),
            PlotCommand::Lines(lines) => {
                for line in &lines {
                    self.ingest_line(line);
                }
            }
            PlotCommand::ClearAll => self.clear_all(),
        }
    }

    /// Parse one input line and apply it. Never fails; unrecognised content
    /// is ignored.
    pub fn ingest_line(&mut self, line: &str) {
        let parsed = parse_line(line);
        self.ingest(&parsed);
    }

    pub fn ingest(&mut self, parsed: &ParsedLine) {
        if !parsed.kv.is_empty() {
            let new_keys = self.metadata.observe(&parsed.kv);
            if !new_keys.is_empty() {
                tracing::debug!(keys = ?new_keys, "new metadata keys");
                self.emit(PlotEvent::new(EventKind::META_KEY_SEEN).with_meta(MetaMeta {
                    new_keys,
                    display: None,
                }));
            }
            self.refresh_meta_display();
        }

        let Some(point) = parsed.point else {
            return;
        };
        // Negative (or out-of-range) channels go to the active curve.
        let channel = parsed.channel.and_then(|ch| ChannelId::try_from(ch).ok());
        let before = self.registry.len();
        let index = self.registry.append(channel, point);
        if self.registry.len() > before {
            self.emit_curve(EventKind::CURVE_ADDED, index);
        }
        self.dirty = true;
    }

    // ── Curve management ────────────────────────────────────────────────

    /// Index of the curve for `channel_id`, creating it if needed.
    pub fn ensure_curve(&mut self, channel_id: ChannelId) -> usize {
        let before = self.registry.len();
        let index = self.registry.ensure_curve(channel_id);
        if self.registry.len() > before {
            self.emit_curve(EventKind::CURVE_ADDED, index);
            self.dirty = true;
        }
        index
    }

    /// Add a curve on the lowest unused channel and make it active.
    pub fn add_curve(&mut self) -> usize {
        let index = self.registry.add_curve();
        self.emit_curve(EventKind::CURVE_ADDED, index);
        self.dirty = true;
        index
    }

    /// Remove the curve at `index`; refused when it is the only one left.
    pub fn remove_curve(&mut self, index: usize) -> bool {
        let Some(removed) = self.registry.remove(index) else {
            tracing::debug!(index, "curve removal refused");
            return false;
        };
        self.emit(PlotEvent::new(EventKind::CURVE_REMOVED).with_curve(CurveMeta {
            channel_id: removed.channel_id,
            name: removed.name,
            index,
        }));
        self.dirty = true;
        true
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        self.registry.set_active(index)
    }

    // ── Per-curve settings (act on the active curve) ────────────────────

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.update_active(|s| s.render_mode = mode);
    }

    pub fn set_fit_type(&mut self, fit_type: FitType) {
        self.update_active(|s| s.fit_type = fit_type);
    }

    pub fn set_show_raw_points_in_fit(&mut self, show: bool) {
        self.update_active(|s| s.show_raw_points_in_fit = show);
    }

    /// Values below the minimum are clamped, not rejected.
    pub fn set_fit_window(&mut self, fit_window: usize) {
        self.update_active(|s| s.fit_window = fit_window);
    }

    /// Shrinking the capacity drops the oldest samples right away.
    pub fn set_max_points(&mut self, max_points: usize) {
        self.update_active(|s| s.max_points = max_points);
    }

    pub fn set_color(&mut self, color: Rgb) {
        let index = self.registry.active_index();
        if self.registry.set_color(index, color) {
            self.dirty = true;
        }
    }

    pub fn set_curve_settings(&mut self, index: usize, settings: CurveSettings) {
        if let Some(curve) = self.registry.get_mut(index) {
            curve.set_settings(settings);
            self.dirty = true;
        }
    }

    fn update_active(&mut self, f: impl FnOnce(&mut CurveSettings)) {
        if let Some(curve) = self.registry.active_mut() {
            let mut settings = curve.settings;
            f(&mut settings);
            curve.set_settings(settings);
            self.dirty = true;
        }
    }

    // ── Metadata selection ──────────────────────────────────────────────

    pub fn select_meta<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.metadata.select(keys);
        self.refresh_meta_display();
    }

    pub fn deselect_meta<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.metadata.deselect(keys);
        self.refresh_meta_display();
    }

    fn refresh_meta_display(&mut self) {
        self.meta_display = self.metadata.render_display();
        self.emit(PlotEvent::new(EventKind::META_UPDATED).with_meta(MetaMeta {
            new_keys: Vec::new(),
            display: Some(self.meta_display.clone()),
        }));
    }

    // ── Viewport ────────────────────────────────────────────────────────

    /// The user moved the scrollbar.
    pub fn scroll_to(&mut self, value: i32) {
        self.viewport.scroll_to(value, self.registry.curves());
        self.dirty = true;
    }

    /// Drop every sample and all metadata; curves stay, the view goes back
    /// to pinned-right with unit ranges.
    pub fn clear_all(&mut self) {
        self.registry.clear_points();
        self.metadata.reset();
        self.meta_display.clear();
        self.viewport.reset();
        self.dirty = true;
        tracing::info!("cleared all data");
        self.emit(PlotEvent::new(EventKind::DATA_CLEARED));
    }

    // ── Render tick ─────────────────────────────────────────────────────

    /// Recompute series, viewport and fits if anything changed since the last
    /// tick. Returns whether work was done.
    pub fn tick(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        let started = Instant::now();

        for curve in self.registry.curves_mut() {
            curve.push_raw_series();
        }
        self.viewport
            .refresh(self.registry.curves(), Refresh::FollowData);

        let x_range = self.viewport.x_range();
        let fit_cfg = self.fit_cfg;
        for curve in self.registry.curves_mut() {
            let fit = if curve.settings.render_mode == RenderMode::Fit
                && curve.settings.fit_type != FitType::None
            {
                compute_fit_curve(curve, x_range, &fit_cfg)
            } else {
                Vec::new()
            };
            curve.set_fit_series(fit);
        }

        tracing::trace!(
            curves = self.registry.len(),
            x0 = x_range.0,
            x1 = x_range.1,
            elapsed_us = started.elapsed().as_micros() as u64,
            "render tick"
        );
        if self.events.is_some() {
            let view = ViewMeta {
                x_range,
                y_range: self.viewport.y_range(),
                pinned_to_right: self.viewport.pinned_to_right(),
                label: self.viewport.range_label(),
            };
            self.emit(PlotEvent::new(EventKind::RENDERED).with_view(view));
        }
        true
    }

    // ── Events ──────────────────────────────────────────────────────────

    fn emit(&self, event: PlotEvent) {
        if let Some(ctrl) = &self.events {
            ctrl.emit(event);
        }
    }

    fn emit_curve(&self, kind: EventKind, index: usize) {
        if self.events.is_none() {
            return;
        }
        if let Some(curve) = self.registry.get(index) {
            self.emit(PlotEvent::new(kind).with_curve(CurveMeta {
                channel_id: curve.channel_id,
                name: curve.name.clone(),
                index,
            }));
        }
    }
}

/// Fixed-cadence tick source, independent of data arrival.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    period: Duration,
    last_tick: Option<Instant>,
}

impl RenderScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            last_tick: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True when a tick should run at `now`; records it as the last tick.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.saturating_duration_since(last) < self.period => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Time left until the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self.period.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_fires_once_per_period() {
        let mut s = RenderScheduler::new(Duration::from_millis(33));
        let t0 = Instant::now();
        assert!(s.due(t0));
        assert!(!s.due(t0 + Duration::from_millis(10)));
        assert_eq!(s.time_until_next(t0 + Duration::from_millis(10)), Duration::from_millis(23));
        assert!(s.due(t0 + Duration::from_millis(33)));
    }

    #[test]
    fn zero_period_is_raised_to_one_millisecond() {
        let s = RenderScheduler::new(Duration::ZERO);
        assert_eq!(s.period(), Duration::from_millis(1));
    }
}
