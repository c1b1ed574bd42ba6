//! Terminal stand-in for the floating clock overlay.

use crate::models::format_clock;
use crate::tracker::TrackingTimer;
use log::warn;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

const MATCHED_MARKER: char = '●';
const IDLE_MARKER: char = '○';

/// Single-line clock redrawn in place on every elapsed update.
#[derive(Debug)]
pub struct ClockDisplay<W> {
    out: W,
    elapsed_secs: u64,
    matched: bool,
}

impl<W: Write> ClockDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            elapsed_secs: 0,
            matched: false,
        }
    }

    /// Recorded only; the following elapsed update redraws.
    pub fn set_matched(&mut self, matched: bool) {
        self.matched = matched;
    }

    pub fn set_elapsed(&mut self, secs: u64) -> io::Result<()> {
        self.elapsed_secs = secs;
        self.render()
    }

    pub fn line(&self) -> String {
        let marker = if self.matched {
            MATCHED_MARKER
        } else {
            IDLE_MARKER
        };
        format!("{marker} {}", format_clock(self.elapsed_secs))
    }

    pub fn render(&mut self) -> io::Result<()> {
        let line = self.line();
        write!(self.out, "\r{line}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Subscribe `display` to both of the timer's signals.
pub fn attach<W>(timer: &mut TrackingTimer, display: &Arc<Mutex<ClockDisplay<W>>>)
where
    W: Write + Send + 'static,
{
    let on_match = Arc::clone(display);
    timer.on_match_state_changed(move |matched| {
        on_match
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .set_matched(matched);
    });

    let on_elapsed = Arc::clone(display);
    timer.on_elapsed_updated(move |secs| {
        let mut display = on_elapsed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Err(e) = display.set_elapsed(secs) {
            warn!("Failed to draw clock: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchList;
    use crate::platform::ScriptedProbe;

    #[test]
    fn test_line_reflects_match_state() {
        let mut display = ClockDisplay::new(Vec::new());
        assert_eq!(display.line(), "○ 00:00:00");

        display.set_matched(true);
        display.set_elapsed(75).unwrap();
        assert_eq!(display.line(), "● 00:01:15");
    }

    #[test]
    fn test_render_redraws_in_place() {
        let mut display = ClockDisplay::new(Vec::new());
        display.set_elapsed(1).unwrap();
        display.set_elapsed(2).unwrap();

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(out, "\r○ 00:00:01\r○ 00:00:02");
    }

    #[test]
    fn test_attach_follows_timer() {
        let mut timer = TrackingTimer::new(ScriptedProbe::new(["Editor", "Browser"]));
        timer.connect_watch_list(Arc::new(WatchList::try_from_titles(["Editor"]).unwrap()));
        let display = Arc::new(Mutex::new(ClockDisplay::new(Vec::new())));
        attach(&mut timer, &display);

        timer.start(1000);
        timer.tick();
        assert_eq!(display.lock().unwrap().line(), "● 00:00:01");
        timer.tick();
        assert_eq!(display.lock().unwrap().line(), "○ 00:00:01");
    }
}
