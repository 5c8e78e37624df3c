//! Event notifications for code embedding the plotter.
//!
//! Callers subscribe through [`EventController`] and receive [`PlotEvent`]s on
//! an `mpsc` channel. Each event carries a set of [`EventKind`] flags; a
//! subscriber's [`EventFilter`] is an OR mask, so an event is delivered when
//! `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::data::curve::ChannelId;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    // ── Curves ──────────────────────────────────────────────────────────
    /// A curve was created (first sample on a new channel, or "add curve").
    pub const CURVE_ADDED: Self = Self(1 << 0);
    /// A curve was deleted.
    pub const CURVE_REMOVED: Self = Self(1 << 1);

    // ── Metadata ────────────────────────────────────────────────────────
    /// A metadata key was seen for the first time.
    pub const META_KEY_SEEN: Self = Self(1 << 2);
    /// The metadata summary text changed.
    pub const META_UPDATED: Self = Self(1 << 3);

    // ── Data / rendering ────────────────────────────────────────────────
    /// All samples and metadata were cleared.
    pub const DATA_CLEARED: Self = Self(1 << 4);
    /// A render tick pushed new data to the series.
    pub const RENDERED: Self = Self(1 << 5);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u64::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// At least one bit in common.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::CURVE_ADDED, "CURVE_ADDED"),
            (EventKind::CURVE_REMOVED, "CURVE_REMOVED"),
            (EventKind::META_KEY_SEEN, "META_KEY_SEEN"),
            (EventKind::META_UPDATED, "META_UPDATED"),
            (EventKind::DATA_CLEARED, "DATA_CLEARED"),
            (EventKind::RENDERED, "RENDERED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata – per-event-type payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of curve add/remove events.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveMeta {
    pub channel_id: ChannelId,
    pub name: String,
    /// Position in the registry at the time of the event.
    pub index: usize,
}

/// Payload of metadata events.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaMeta {
    /// Keys seen for the first time (for `META_KEY_SEEN`).
    pub new_keys: Vec<String>,
    /// Rendered summary text (for `META_UPDATED`).
    pub display: Option<String>,
}

/// Payload of `RENDERED`: the viewport after the tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewMeta {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub pinned_to_right: bool,
    pub label: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// PlotEvent
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PlotEvent {
    pub kinds: EventKind,
    /// Seconds since the controller was created; set on emit.
    pub timestamp: f64,

    pub curve: Option<CurveMeta>,
    pub meta: Option<MetaMeta>,
    pub view: Option<ViewMeta>,
}

impl PlotEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            curve: None,
            meta: None,
            view: None,
        }
    }

    pub fn with_curve(mut self, curve: CurveMeta) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn with_meta(mut self, meta: MetaMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_view(mut self, view: ViewMeta) -> Self {
        self.view = Some(view);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// Selects which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &PlotEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<PlotEvent>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

/// Collects and distributes events to subscribers.
///
/// Attach it to [`PlotConfig`](crate::config::PlotConfig) before creating the
/// engine, then call [`subscribe`](Self::subscribe) to receive events.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    // A panicking subscriber thread must not take event delivery down with it.
    fn lock(&self) -> MutexGuard<'_, EventCtrlInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Subscribe to events whose kinds intersect the filter mask.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<PlotEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    pub fn subscribe_all(&self) -> Receiver<PlotEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to matching subscribers, dropping those whose
    /// receiver is gone.
    pub fn emit(&self, mut event: PlotEvent) {
        let mut inner = self.lock();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
