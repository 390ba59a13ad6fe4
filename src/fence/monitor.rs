//! Enter/exit detection over a stream of position samples
//!
//! Each sample is compared against the status left by the previous one, so
//! samples must be fed in delivery order.

use serde::Deserialize;

use crate::geometry::{Point, Polygon, contains};

/// Containment status carried between evaluations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Unknown,
    Inside,
    Outside,
}

impl Status {
    fn from_inside(inside: bool) -> Self {
        if inside {
            Status::Inside
        } else {
            Status::Outside
        }
    }

    /// Status bar text for an active fence
    pub fn label(&self) -> &'static str {
        match self {
            Status::Inside => "Inside Geofence",
            // An undetermined status reads as outside, same as the app's false default
            Status::Outside | Status::Unknown => "Outside Geofence",
        }
    }
}

/// Outcome of a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NoChange,
    EnteredFence,
    ExitedFence,
    NoFenceActive,
}

impl Transition {
    /// User-facing alert text, only for actual boundary crossings
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            Transition::EnteredFence => Some("Entered geofence area!"),
            Transition::ExitedFence => Some("Left geofence area!"),
            Transition::NoChange | Transition::NoFenceActive => None,
        }
    }

}

/// What the monitor assumes before the first sample of the session.
///
/// `Unknown` stays silent on the first determination. `Outside` treats the
/// user as outside until proven otherwise, so a first sample inside the fence
/// raises `EnteredFence`. Either way a fence that is cleared and redrawn
/// restarts from `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    #[default]
    Unknown,
    Outside,
}

impl SeedPolicy {
    fn seed(&self) -> Status {
        match self {
            SeedPolicy::Unknown => Status::Unknown,
            SeedPolicy::Outside => Status::Outside,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeofenceMonitor {
    last_status: Status,
}

impl Default for GeofenceMonitor {
    fn default() -> Self {
        Self::new(SeedPolicy::default())
    }
}

impl GeofenceMonitor {
    pub fn new(policy: SeedPolicy) -> Self {
        Self {
            last_status: policy.seed(),
        }
    }

    pub fn status(&self) -> Status {
        self.last_status
    }

    /// Evaluate one position sample against the current fence snapshot.
    ///
    /// A polygon with fewer than 3 vertices means no fence: the status drops
    /// to `Unknown` so a fence drawn later starts fresh.
    pub fn evaluate(&mut self, position: Point, polygon: &Polygon) -> Transition {
        if !polygon.is_evaluable() {
            self.last_status = Status::Unknown;
            return Transition::NoFenceActive;
        }

        let now = Status::from_inside(contains(position, polygon));

        match (self.last_status, now) {
            (Status::Unknown, _) => {
                self.last_status = now;
                Transition::NoChange
            }
            (prev, now) if prev == now => Transition::NoChange,
            (_, Status::Inside) => {
                self.last_status = now;
                Transition::EnteredFence
            }
            _ => {
                self.last_status = now;
                Transition::ExitedFence
            }
        }
    }
}
