pub mod feed;
pub mod filter;

pub use feed::{SessionEvent, parse_feed, read_feed};
pub use filter::{DEFAULT_DISTANCE_FILTER_M, DistanceFilter};
