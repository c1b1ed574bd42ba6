use crate::constants::SECS_PER_DAY;

/// Mutable state behind a tracking timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingSession {
    pub elapsed_secs: u64,
    pub running: bool,
    pub last_match: bool,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tick's outcome. Returns the elapsed seconds afterwards.
    pub fn record_tick(&mut self, matched: bool) -> u64 {
        if matched {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.last_match = matched;
        self.elapsed_secs
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
    }

    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }
}

/// Render seconds as `hh:mm:ss`. Hours wrap at 24.
pub fn format_clock(secs: u64) -> String {
    let secs = secs % SECS_PER_DAY;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
