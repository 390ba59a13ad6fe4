//! fencewatch - Draw a polygon geofence and get alerts when a tracked position crosses it

pub mod config;
pub mod fence;
pub mod geometry;
pub mod location;
pub mod session;
