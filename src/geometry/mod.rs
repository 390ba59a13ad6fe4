pub mod containment;
pub mod point;
pub mod projection;

pub use containment::contains;
pub use point::{Point, Polygon};
pub use projection::{Projector, distance_m};
