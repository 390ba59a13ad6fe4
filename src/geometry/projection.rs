use super::Point;

/// Meters per degree at equator
const METERS_PER_DEGREE: f64 = 111320.0;

/// Equirectangular projection from WGS84 to local meters
///
/// - x = (lon - origin_lon) * cos(origin_lat) * 111320
/// - y = (lat - origin_lat) * 111320
///
/// Good enough for the short hops between consecutive location samples.
#[derive(Debug, Clone)]
pub struct Projector {
    origin: Point,
    cos_lat: f64,
}

impl Projector {
    /// Create a projector anchored at `origin`
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            cos_lat: origin.lat.to_radians().cos(),
        }
    }

    /// Project a point to (x, y) meters relative to the origin
    pub fn project(&self, p: Point) -> (f64, f64) {
        let x = (p.lon - self.origin.lon) * self.cos_lat * METERS_PER_DEGREE;
        let y = (p.lat - self.origin.lat) * METERS_PER_DEGREE;
        (x, y)
    }

    /// Straight-line distance in meters from the origin to `p`
    pub fn distance_to(&self, p: Point) -> f64 {
        let (x, y) = self.project(p);
        x.hypot(y)
    }
}

/// Approximate ground distance in meters between two nearby points
pub fn distance_m(a: Point, b: Point) -> f64 {
    Projector::new(a).distance_to(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projector_origin() {
        let proj = Projector::new(Point::new(37.7749, -122.4194));
        let (x, y) = proj.project(Point::new(37.7749, -122.4194));
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projector_1km() {
        let proj = Projector::new(Point::new(37.7749, -122.4194));

        // 0.009 degrees of latitude is roughly 1 km
        let (_, y) = proj.project(Point::new(37.7749 + 0.009, -122.4194));
        assert!((y - 1000.0).abs() < 50.0);
    }

    #[test]
    fn test_distance_shrinks_with_latitude() {
        let at_equator = distance_m(Point::new(0.0, 0.0), Point::new(0.0, 0.001));
        let at_sixty = distance_m(Point::new(60.0, 0.0), Point::new(60.0, 0.001));
        assert!((at_equator - 111.32).abs() < 0.01);
        assert!((at_sixty - at_equator / 2.0).abs() < 0.1);
    }

    #[test]
    fn test_ten_meter_hop() {
        // ~10m north
        let d = distance_m(
            Point::new(37.78825, -122.4324),
            Point::new(37.78825 + 10.0 / METERS_PER_DEGREE, -122.4324),
        );
        assert!((d - 10.0).abs() < 1e-6);
    }
}
