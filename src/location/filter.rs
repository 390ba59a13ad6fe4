use crate::geometry::{Point, distance_m};

/// Default minimum movement between delivered samples, in meters
pub const DEFAULT_DISTANCE_FILTER_M: f64 = 10.0;

/// Gate that only lets a sample through once the device has moved far enough
/// from the last delivered one.
///
/// The first sample is always delivered.
#[derive(Debug, Clone)]
pub struct DistanceFilter {
    min_distance_m: f64,
    last: Option<Point>,
}

impl Default for DistanceFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE_FILTER_M)
    }
}

impl DistanceFilter {
    pub fn new(min_distance_m: f64) -> Self {
        Self {
            min_distance_m: min_distance_m.max(0.0),
            last: None,
        }
    }

    pub fn min_distance_m(&self) -> f64 {
        self.min_distance_m
    }

    /// Returns `true` if `sample` should be delivered, remembering it if so
    pub fn accept(&mut self, sample: Point) -> bool {
        match self.last {
            Some(prev) if distance_m(prev, sample) < self.min_distance_m => false,
            _ => {
                self.last = Some(sample);
                true
            }
        }
    }

    pub fn last_delivered(&self) -> Option<Point> {
        self.last
    }
}
