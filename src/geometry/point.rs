use geo::Area;
use serde::{Deserialize, Serialize};

/// A geographic position in WGS84 degrees.
///
/// Values are not range-checked; whatever the location source or the map
/// tap reports is carried through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::coord! { x: p.lon, y: p.lat }
    }
}

/// Ordered fence vertices. The last vertex closes back onto the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A polygon needs at least three vertices before it can fence anything
    pub fn is_evaluable(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// True when the ring encloses no area (repeated or collinear vertices).
    ///
    /// Non-evaluable polygons are always degenerate.
    pub fn is_degenerate(&self) -> bool {
        if !self.is_evaluable() {
            return true;
        }
        self.to_geo().unsigned_area() == 0.0
    }

    /// Convert to a closed `geo` polygon (x = lon, y = lat)
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let ring: geo::LineString<f64> = self
            .vertices
            .iter()
            .map(|&p| geo::Coord::from(p))
            .collect();
        geo::Polygon::new(ring, vec![])
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }
}

impl From<&[(f64, f64)]> for Polygon {
    fn from(points: &[(f64, f64)]) -> Self {
        Self {
            vertices: points.iter().map(|&p| Point::from(p)).collect(),
        }
    }
}
