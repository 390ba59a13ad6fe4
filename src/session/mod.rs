//! A single app session: one fence, one tracked user.
//!
//! Routes taps, button presses and location samples into the fence editor
//! and monitor, and keeps what the screen would show (status text, markers,
//! visible region) up to date.

use tracing::{debug, info, warn};

use crate::config::{FileConfig, Region};
use crate::fence::{FenceEditor, FenceError, GeofenceMonitor, SeedPolicy, Transition};
use crate::geometry::{Point, Polygon};
use crate::location::{DistanceFilter, SessionEvent};

pub const NO_FENCE_TEXT: &str = "No Geofence Set";

/// A user-facing popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

impl Alert {
    fn geofence(transition: Transition) -> Option<Self> {
        transition.alert_message().map(|msg| Self {
            title: "Geofence Alert",
            message: msg.to_string(),
        })
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error",
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    editor: FenceEditor,
    monitor: GeofenceMonitor,
    filter: DistanceFilter,
    location: Option<Point>,
    default_region: Region,
    region: Region,
    last_transition: Option<Transition>,
}

impl Session {
    pub fn new(seed: SeedPolicy, distance_filter_m: f64, default_region: Region) -> Self {
        Self {
            editor: FenceEditor::new(),
            monitor: GeofenceMonitor::new(seed),
            filter: DistanceFilter::new(distance_filter_m),
            location: None,
            default_region,
            region: default_region,
            last_transition: None,
        }
    }

    pub fn from_config(config: &FileConfig) -> Self {
        Self::new(config.seed, config.distance_filter_m, config.default_region)
    }

    /// Apply one event, returning any alerts it raised
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Alert> {
        match event {
            SessionEvent::Tap { lat, lon } => self.tap(Point::new(lat, lon)),
            SessionEvent::Position { lat, lon } => {
                self.observe(Point::new(lat, lon)).into_iter().collect()
            }
            SessionEvent::StartDrawing => {
                self.editor.start_drawing();
                debug!("drawing started");
                Vec::new()
            }
            SessionEvent::FinishDrawing => match self.editor.finish_drawing() {
                Ok(()) => self.fence_finished(),
                Err(e) => rejected(e),
            },
            SessionEvent::ToggleDrawing => match self.editor.toggle_drawing() {
                Ok(true) => {
                    debug!("drawing started");
                    Vec::new()
                }
                Ok(false) => self.fence_finished(),
                Err(e) => rejected(e),
            },
            SessionEvent::Clear => {
                self.editor.clear();
                info!("fence cleared");
                self.fence_changed()
            }
            SessionEvent::Center => {
                self.center();
                Vec::new()
            }
        }
    }

    fn tap(&mut self, p: Point) -> Vec<Alert> {
        if !self.editor.add_vertex(p) {
            debug!(lat = p.lat, lon = p.lon, "tap ignored, not drawing");
            return Vec::new();
        }
        debug!(
            lat = p.lat,
            lon = p.lon,
            vertices = self.editor.vertices().len(),
            "vertex added"
        );
        self.fence_changed()
    }

    /// Re-check the last known location against the edited fence, the way a
    /// re-armed position watch delivers a fresh fix right away.
    ///
    /// Bypasses the distance filter: the user has not moved, the fence has.
    fn fence_changed(&mut self) -> Vec<Alert> {
        match self.location {
            Some(p) => self.evaluate(p).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn fence_finished(&self) -> Vec<Alert> {
        let fence = self.editor.polygon();
        if fence.is_degenerate() {
            warn!(
                vertices = fence.len(),
                "fence encloses no area; containment may never report inside"
            );
        }
        info!(vertices = fence.len(), "fence finished");
        Vec::new()
    }

    /// Feed a raw location sample through the distance gate and the monitor.
    ///
    /// Samples closer than the configured distance to the last delivered one
    /// are dropped before evaluation.
    pub fn observe(&mut self, p: Point) -> Option<Alert> {
        if !self.filter.accept(p) {
            debug!(lat = p.lat, lon = p.lon, "sample below distance filter");
            return None;
        }
        self.evaluate(p)
    }

    fn evaluate(&mut self, p: Point) -> Option<Alert> {
        self.location = Some(p);
        let transition = self.monitor.evaluate(p, &self.editor.polygon());
        self.last_transition = Some(transition);

        debug!(lat = p.lat, lon = p.lon, ?transition, "evaluated sample");
        let alert = Alert::geofence(transition);
        if let Some(ref a) = alert {
            info!(lat = p.lat, lon = p.lon, "{}", a.message);
        }
        alert
    }

    fn center(&mut self) {
        self.region = match self.location {
            Some(p) => Region::around(p),
            None => self.default_region,
        };
        debug!(lat = self.region.lat, lon = self.region.lon, "centered map");
    }

    /// Status bar text
    pub fn status_text(&self) -> &'static str {
        if self.editor.polygon().is_evaluable() {
            self.monitor.status().label()
        } else {
            NO_FENCE_TEXT
        }
    }

    pub fn editor(&self) -> &FenceEditor {
        &self.editor
    }

    pub fn monitor(&self) -> &GeofenceMonitor {
        &self.monitor
    }

    pub fn fence(&self) -> Polygon {
        self.editor.polygon()
    }

    pub fn location(&self) -> Option<Point> {
        self.location
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }
}

fn rejected(e: FenceError) -> Vec<Alert> {
    warn!("{}", e);
    vec![Alert::error("Please draw at least 3 points for the fence")]
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&FileConfig::default())
    }
}
