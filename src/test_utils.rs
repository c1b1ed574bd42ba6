//! Shared test utilities for worktimer.
//!
//! Recording listeners for asserting on what a timer emitted, and in what order.

#![cfg(test)]

use crate::tracker::TrackingTimer;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    Match(bool),
    Elapsed(u64),
}

/// Everything a timer emitted since `record` was called.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Emitted>>>,
}

impl Recorder {
    pub fn all(&self) -> Vec<Emitted> {
        self.events.lock().expect("recorder lock").clone()
    }

    pub fn matches(&self) -> Vec<bool> {
        self.all()
            .into_iter()
            .filter_map(|e| match e {
                Emitted::Match(m) => Some(m),
                Emitted::Elapsed(_) => None,
            })
            .collect()
    }

    pub fn elapsed(&self) -> Vec<u64> {
        self.all()
            .into_iter()
            .filter_map(|e| match e {
                Emitted::Elapsed(secs) => Some(secs),
                Emitted::Match(_) => None,
            })
            .collect()
    }
}

/// Subscribe a recorder to both of the timer's signals.
pub fn record(timer: &mut TrackingTimer) -> Recorder {
    let recorder = Recorder::default();

    let events = Arc::clone(&recorder.events);
    timer.on_match_state_changed(move |m| {
        events.lock().expect("recorder lock").push(Emitted::Match(m));
    });
    let events = Arc::clone(&recorder.events);
    timer.on_elapsed_updated(move |secs| {
        events.lock().expect("recorder lock").push(Emitted::Elapsed(secs));
    });

    recorder
}
