pub mod editor;
pub mod monitor;

pub use editor::{FenceEditor, FenceError, MIN_FENCE_VERTICES};
pub use monitor::{GeofenceMonitor, SeedPolicy, Status, Transition};
