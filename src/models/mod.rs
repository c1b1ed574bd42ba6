pub mod session;
pub mod watch_list;

pub use session::{format_clock, TrackingSession};
pub use watch_list::{SharedWatchList, WatchList};
