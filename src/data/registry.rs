//! Ordered collection of curves keyed by channel id.

use crate::data::color::{default_color_for_index, Rgb};
use crate::data::curve::{ChannelId, Curve, CurveSettings};

#[derive(Debug, Clone)]
pub struct CurveRegistry {
    curves: Vec<Curve>,
    active: usize,
    /// Settings for new curves when there is no active curve to copy from.
    defaults: CurveSettings,
}

impl CurveRegistry {
    /// Empty registry. Callers normally follow up with `ensure_curve(0)`.
    pub fn new(defaults: CurveSettings) -> Self {
        Self {
            curves: Vec::new(),
            active: 0,
            defaults: defaults.clamped(),
        }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut [Curve] {
        &mut self.curves
    }

    pub fn get(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Curve> {
        self.curves.get_mut(index)
    }

    pub fn index_of(&self, channel_id: ChannelId) -> Option<usize> {
        self.curves.iter().position(|c| c.channel_id == channel_id)
    }

    pub fn by_channel(&self, channel_id: ChannelId) -> Option<&Curve> {
        self.index_of(channel_id).and_then(|i| self.curves.get(i))
    }

    /// Index of the curve for `channel_id`, creating it if needed.
    ///
    /// A new curve copies the active curve's settings (what the controls
    /// currently show) and gets the next default color.
    pub fn ensure_curve(&mut self, channel_id: ChannelId) -> usize {
        if let Some(i) = self.index_of(channel_id) {
            return i;
        }
        let settings = self.active().map_or(self.defaults, |c| c.settings);
        let index = self.curves.len();
        self.curves
            .push(Curve::new(channel_id, default_color_for_index(index), settings));
        tracing::info!(channel = channel_id, index, "curve created");
        index
    }

    /// Lowest channel id not used by any curve.
    pub fn next_unused_channel(&self) -> ChannelId {
        let mut ch: ChannelId = 0;
        while self.index_of(ch).is_some() {
            ch += 1;
        }
        ch
    }

    /// Create a curve on the next unused channel and make it active.
    pub fn add_curve(&mut self) -> usize {
        let index = self.ensure_curve(self.next_unused_channel());
        self.active = index;
        index
    }

    /// Append to the curve for `channel`, or to the active curve when the
    /// record has no (non-negative) channel. Returns the target index.
    pub fn append(&mut self, channel: Option<ChannelId>, point: [f64; 2]) -> usize {
        let index = match channel {
            Some(ch) => self.ensure_curve(ch),
            None if self.curves.is_empty() => self.ensure_curve(0),
            None => self.active,
        };
        if let Some(curve) = self.curves.get_mut(index) {
            curve.push(point);
        }
        index
    }

    /// Delete the curve at `index`. Refused when it is the last one.
    pub fn remove(&mut self, index: usize) -> Option<Curve> {
        if self.curves.len() <= 1 || index >= self.curves.len() {
            return None;
        }
        let removed = self.curves.remove(index);
        if index < self.active || self.active >= self.curves.len() {
            self.active = self.active.saturating_sub(1).min(self.curves.len() - 1);
        }
        tracing::info!(channel = removed.channel_id, index, "curve removed");
        Some(removed)
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.curves.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&Curve> {
        self.curves.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Curve> {
        self.curves.get_mut(self.active)
    }

    pub fn set_color(&mut self, index: usize, color: Rgb) -> bool {
        match self.curves.get_mut(index) {
            Some(c) => {
                c.color = color;
                true
            }
            None => false,
        }
    }

    /// Empty every buffer; curves themselves are kept.
    pub fn clear_points(&mut self) {
        for c in &mut self.curves {
            c.clear_all();
        }
    }
}
