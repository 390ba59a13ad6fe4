//! Point-in-polygon test for fence evaluation
//!
//! Even-odd ray casting over lat/lon degrees. The ray runs from the point
//! toward increasing latitude; every fence edge whose longitude span straddles
//! the point and whose crossing lies beyond the point flips the result.

use super::{Point, Polygon};

/// Check whether `point` lies inside `polygon`.
///
/// Returns `false` for polygons with fewer than 3 vertices. Points exactly on
/// an edge get whatever the crossing test yields; no tolerance is applied.
pub fn contains(point: Point, polygon: &Polygon) -> bool {
    let vertices = &polygon.vertices;
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].lat, vertices[i].lon);
        let (xj, yj) = (vertices[j].lat, vertices[j].lon);

        // Strict straddle excludes edges with yi == yj, so the divisor is never zero
        let straddles = (yi > point.lon) != (yj > point.lon);
        if straddles && point.lat < (xj - xi) * (point.lon - yi) / (yj - yi) + xi {
            inside = !inside;
        }

        j = i;
    }

    inside
}
