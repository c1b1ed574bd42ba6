pub mod scheduler;
pub mod signal;

pub use scheduler::{TimerHandle, TimerLoop};
pub use signal::{ListenerId, Signal};

use crate::constants::DEFAULT_PERIOD_MS;
use crate::models::TrackingSession;
use crate::platform::ActiveWindowProbe;
use crate::validation::{clamp_period_ms, is_valid_period_ms};
use log::{debug, info, trace, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Membership query the timer runs against the front end's watch list.
pub trait WatchListSource: Send + Sync {
    fn contains(&self, title: &str) -> bool;
}

/// Periodic focus sampler that accumulates matched seconds.
///
/// The timer never reaches back into its consumers: the watch list is
/// injected, and state changes go out through two signals. Each evaluated tick
/// emits `match_state_changed` first and `elapsed_updated` second.
///
/// Scheduling is deadline based. Something has to call [`TrackingTimer::poll`]
/// (normally [`TimerLoop`]); `tick` can also be driven by hand.
pub struct TrackingTimer {
    probe: Box<dyn ActiveWindowProbe>,
    watch_list: Option<Arc<dyn WatchListSource>>,
    session: TrackingSession,
    period: Duration,
    next_tick: Option<Instant>,
    elapsed_updated: Signal<u64>,
    match_state_changed: Signal<bool>,
}

impl TrackingTimer {
    pub fn new<P>(probe: P) -> Self
    where
        P: ActiveWindowProbe + 'static,
    {
        Self {
            probe: Box::new(probe),
            watch_list: None,
            session: TrackingSession::new(),
            period: Duration::from_millis(DEFAULT_PERIOD_MS),
            next_tick: None,
            elapsed_updated: Signal::new(),
            match_state_changed: Signal::new(),
        }
    }

    /// Until a watch list is connected, ticks are skipped.
    pub fn connect_watch_list(&mut self, watch_list: Arc<dyn WatchListSource>) {
        self.watch_list = Some(watch_list);
    }

    pub fn disconnect_watch_list(&mut self) {
        self.watch_list = None;
    }

    pub fn on_elapsed_updated<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.elapsed_updated.connect(listener)
    }

    pub fn on_match_state_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.match_state_changed.connect(listener)
    }

    /// Start ticking every `period_ms` milliseconds, first tick one period
    /// from now. Restarts with the new period if already running.
    pub fn start(&mut self, period_ms: i64) {
        self.start_at(period_ms, Instant::now());
    }

    pub fn start_at(&mut self, period_ms: i64, now: Instant) {
        if !is_valid_period_ms(period_ms) {
            warn!(
                "Invalid timer period {period_ms} ms, clamping to {} ms",
                clamp_period_ms(period_ms)
            );
        }
        self.period = Duration::from_millis(clamp_period_ms(period_ms));

        if self.session.running {
            info!("Restarting timer with {} ms period", self.period.as_millis());
        } else {
            info!("Starting timer with {} ms period", self.period.as_millis());
        }
        self.session.running = true;
        self.next_tick = Some(now + self.period);
    }

    /// Cancel ticking. Elapsed time is kept.
    pub fn stop(&mut self) {
        if self.session.running {
            info!("Stopping timer at {}", self.session.clock());
        }
        self.session.running = false;
        self.next_tick = None;
    }

    /// Reset elapsed time to zero without touching the running state.
    pub fn clear(&mut self) {
        debug!("Clearing elapsed time ({} s)", self.session.elapsed_secs);
        self.session.reset();
    }

    /// Sample focus once and update state.
    ///
    /// Returns false when the tick was skipped: the timer is idle or no watch
    /// list is connected. Skipped ticks change nothing and emit nothing.
    pub fn tick(&mut self) -> bool {
        if !self.session.running {
            return false;
        }
        let Some(watch_list) = self.watch_list.as_ref() else {
            trace!("No watch list connected, skipping tick");
            return false;
        };

        let title = self.probe.current_focused_title();
        let matched = !title.is_empty() && watch_list.contains(&title);
        trace!("Focused {title:?} (matched: {matched})");

        let elapsed = self.session.record_tick(matched);
        self.match_state_changed.emit(matched);
        self.elapsed_updated.emit(elapsed);
        true
    }

    /// Fire a tick if one is due at `now`. Returns whether a tick fired.
    ///
    /// A timer that has fallen a full period behind is rescheduled from `now`
    /// instead of catching up in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_tick else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.period;
        if next <= now {
            debug!("Timer fell behind by {:?}, rescheduling", now - due);
            next = now + self.period;
        }
        self.next_tick = Some(next);
        self.tick();
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.session.elapsed_secs
    }

    pub fn last_match(&self) -> bool {
        self.session.last_match
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    /// Open window titles as seen by this timer's probe.
    pub fn open_window_titles(&self) -> Vec<String> {
        self.probe.all_open_window_titles()
    }
}

impl std::fmt::Debug for TrackingTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingTimer")
            .field("session", &self.session)
            .field("period", &self.period)
            .field("next_tick", &self.next_tick)
            .field("watch_list_connected", &self.watch_list.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchList;
    use crate::platform::ScriptedProbe;
    use crate::test_utils::{record, Emitted};

    fn timer_with(titles: &[&str], watched: &[&str]) -> TrackingTimer {
        let mut timer = TrackingTimer::new(ScriptedProbe::new(titles.iter().copied()));
        let list = WatchList::try_from_titles(watched.iter().copied()).unwrap();
        timer.connect_watch_list(Arc::new(list));
        timer
    }

    #[test]
    fn test_scenario_sequence() {
        let mut timer = timer_with(
            &["Editor", "Browser", "Terminal", "Editor", "Unknown"],
            &["Editor", "Terminal"],
        );
        let events = record(&mut timer);
        timer.start(1000);

        let mut elapsed = Vec::new();
        for _ in 0..5 {
            assert!(timer.tick());
            elapsed.push(timer.elapsed_secs());
        }

        assert_eq!(elapsed, [1, 1, 2, 3, 3]);
        assert_eq!(events.matches(), [true, false, true, true, false]);
        assert_eq!(events.elapsed(), [1, 1, 2, 3, 3]);
    }

    #[test]
    fn test_match_emitted_before_elapsed() {
        let mut timer = timer_with(&["Editor", "Browser"], &["Editor"]);
        let events = record(&mut timer);
        timer.start(1000);
        timer.tick();
        timer.tick();

        assert_eq!(
            events.all(),
            [
                Emitted::Match(true),
                Emitted::Elapsed(1),
                Emitted::Match(false),
                Emitted::Elapsed(1),
            ]
        );
    }

    #[test]
    fn test_initial_state_is_idle() {
        let timer = timer_with(&[], &[]);
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.next_deadline(), None);
        assert_eq!(timer.period(), Duration::from_millis(DEFAULT_PERIOD_MS));
    }

    #[test]
    fn test_idempotent_stop() {
        let mut timer = timer_with(&["Editor"; 3], &["Editor"]);
        let events = record(&mut timer);

        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.tick());

        timer.start(1000);
        timer.tick();
        timer.stop();
        timer.stop();

        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_secs(), 1);
        assert_eq!(timer.next_deadline(), None);
        assert_eq!(events.all().len(), 2);
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let mut timer = timer_with(&["Editor"; 10], &["Editor"]);
        let events = record(&mut timer);
        let t0 = Instant::now();

        timer.start_at(1000, t0);
        assert!(timer.poll(t0 + Duration::from_millis(1000)));
        timer.stop();

        for i in 0..5 {
            assert!(!timer.tick());
            assert!(!timer.poll(t0 + Duration::from_secs(2 + i)));
        }
        assert_eq!(timer.elapsed_secs(), 1);
        assert_eq!(events.elapsed(), [1]);
    }

    #[test]
    fn test_clear_keeps_running() {
        let mut timer = timer_with(&["Editor", "Editor", "Editor"], &["Editor"]);
        timer.start(1000);
        timer.tick();
        timer.tick();

        timer.clear();
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_secs(), 0);

        assert!(timer.tick());
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn test_clear_while_idle() {
        let mut timer = timer_with(&["Editor"], &["Editor"]);
        timer.start(1000);
        timer.tick();
        timer.stop();

        timer.clear();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_secs(), 0);
    }

    #[test]
    fn test_stop_keeps_elapsed_and_resume_continues() {
        let mut timer = timer_with(&["Editor", "Editor"], &["Editor"]);
        timer.start(1000);
        timer.tick();
        timer.stop();
        timer.start(1000);
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 2);
    }

    #[test]
    fn test_monotonic_accumulation() {
        let titles = ["a", "x", "b", "b", "y", "z", "a", "", "c", "a"];
        let mut timer = timer_with(&titles, &["a", "b", "c"]);
        timer.start(1000);

        let mut previous = 0;
        for _ in 0..titles.len() {
            timer.tick();
            assert!(timer.elapsed_secs() >= previous);
            previous = timer.elapsed_secs();
        }
        assert_eq!(timer.elapsed_secs(), 6);
    }

    #[test]
    fn test_non_match_is_noop() {
        let mut timer = timer_with(&["Editor", "Browser"], &["Editor"]);
        let events = record(&mut timer);
        timer.start(1000);
        timer.tick();
        timer.tick();

        assert_eq!(timer.elapsed_secs(), 1);
        assert!(!timer.last_match());
        assert_eq!(events.matches(), [true, false]);
    }

    #[test]
    fn test_empty_title_never_matches() {
        let mut timer = timer_with(&["", ""], &["Editor"]);
        let events = record(&mut timer);
        timer.start(1000);

        assert!(timer.tick());
        // script exhausted: probe keeps reporting ""
        assert!(timer.tick());
        assert!(timer.tick());

        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(events.matches(), [false, false, false]);
        assert_eq!(events.elapsed(), [0, 0, 0]);
    }

    #[test]
    fn test_empty_watch_list_never_matches() {
        let mut timer = timer_with(&["Editor", "Terminal", "", "Browser"], &[]);
        let events = record(&mut timer);
        timer.start(1000);
        for _ in 0..4 {
            timer.tick();
        }

        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(events.matches(), [false; 4]);
        assert_eq!(events.elapsed(), [0; 4]);
    }

    #[test]
    fn test_missing_watch_list_skips_tick() {
        let probe = ScriptedProbe::new(["Editor", "Editor"]);
        let mut timer = TrackingTimer::new(probe);
        let events = record(&mut timer);
        timer.start(1000);

        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(events.all().is_empty());
        assert!(timer.is_running());
    }

    #[test]
    fn test_missing_watch_list_does_not_consume_probe() {
        let mut timer = TrackingTimer::new(ScriptedProbe::new(["Editor"]));
        timer.start(1000);
        timer.tick();

        timer.connect_watch_list(Arc::new(WatchList::try_from_titles(["Editor"]).unwrap()));
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn test_watch_list_changes_seen_next_tick() {
        let shared = WatchList::new().into_shared();
        let mut timer = TrackingTimer::new(ScriptedProbe::new(["Editor", "Editor", "Editor"]));
        timer.connect_watch_list(Arc::clone(&shared) as Arc<dyn WatchListSource>);
        timer.start(1000);

        timer.tick();
        assert_eq!(timer.elapsed_secs(), 0);

        shared.lock().unwrap().add("Editor").unwrap();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 1);

        shared.lock().unwrap().remove("Editor").unwrap();
        timer.tick();
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn test_invalid_period_is_clamped() {
        let mut timer = timer_with(&[], &[]);
        timer.start(0);
        assert_eq!(timer.period(), Duration::from_millis(1));
        timer.start(-100);
        assert_eq!(timer.period(), Duration::from_millis(1));
        assert!(timer.is_running());
    }

    #[test]
    fn test_poll_fires_on_deadline() {
        let mut timer = timer_with(&["Editor"; 3], &["Editor"]);
        let t0 = Instant::now();
        timer.start_at(1000, t0);

        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(999)));
        assert!(timer.poll(t0 + Duration::from_millis(1000)));
        assert_eq!(timer.next_deadline(), Some(t0 + Duration::from_millis(2000)));
        assert!(!timer.poll(t0 + Duration::from_millis(1500)));
        assert!(timer.poll(t0 + Duration::from_millis(2010)));
        assert_eq!(timer.elapsed_secs(), 2);
    }

    #[test]
    fn test_poll_does_not_burst_when_behind() {
        let mut timer = timer_with(&["Editor"; 10], &["Editor"]);
        let t0 = Instant::now();
        timer.start_at(1000, t0);

        let late = t0 + Duration::from_millis(5500);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.next_deadline(), Some(late + Duration::from_millis(1000)));
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let mut timer = timer_with(&["Editor"; 10], &["Editor"]);
        let t0 = Instant::now();
        timer.start_at(1000, t0);
        timer.start_at(250, t0 + Duration::from_millis(100));

        assert_eq!(timer.next_deadline(), Some(t0 + Duration::from_millis(350)));
        assert!(!timer.poll(t0 + Duration::from_millis(349)));
        assert!(timer.poll(t0 + Duration::from_millis(350)));
        assert_eq!(timer.next_deadline(), Some(t0 + Duration::from_millis(600)));
        assert_eq!(timer.elapsed_secs(), 1);
    }

    #[test]
    fn test_open_window_titles_from_probe() {
        let probe = ScriptedProbe::new(Vec::<String>::new()).with_open_windows(["A", "B"]);
        let timer = TrackingTimer::new(probe);
        assert_eq!(timer.open_window_titles(), ["A", "B"]);
    }
}
