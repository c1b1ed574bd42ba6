// src/constants.rs

/// Maximum number of titles the watch list may hold
pub const MAX_WATCH_LIST_LEN: usize = 3;

/// Default tick period in milliseconds
pub const DEFAULT_PERIOD_MS: u64 = 1000;

/// Smallest tick period a timer will accept; anything lower is clamped up
pub const MIN_PERIOD_MS: u64 = 1;

/// Largest tick period a timer will accept (one day)
pub const MAX_PERIOD_MS: u64 = SECS_PER_DAY * 1000;

/// Maximum window title length accepted into the watch list
pub const MAX_TITLE_LEN: usize = 512;

/// Seconds in one day (24 * 60 * 60)
pub const SECS_PER_DAY: u64 = 86400;

/// Upper bound on a single `osascript` invocation, in milliseconds
pub const OSASCRIPT_TIMEOUT_MS: u64 = 2000;
