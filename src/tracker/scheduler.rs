//! Single-threaded driver for a [`TrackingTimer`].
//!
//! The loop thread owns the timer outright. Ticks and the start/stop/clear
//! commands posted through [`TimerHandle`] are all applied on that one thread,
//! one at a time, so timer state needs no locking.

use super::TrackingTimer;
use crate::error::AppError;
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Instant;

enum Command {
    Start { period_ms: i64 },
    Stop { ack: Option<Sender<()>> },
    Clear,
    Shutdown,
}

/// Posts commands onto a running [`TimerLoop`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    tx: Sender<Command>,
    loop_thread: ThreadId,
}

impl TimerHandle {
    pub fn start(&self, period_ms: i64) -> Result<(), AppError> {
        self.send(Command::Start { period_ms })
    }

    /// Stop ticking. When called from outside the loop this blocks until the
    /// loop has applied the stop, so no tick fires after it returns.
    ///
    /// From a listener (on the loop thread) it cannot wait; the stop is
    /// applied right after the current tick finishes, before any further tick.
    pub fn stop(&self) -> Result<(), AppError> {
        if thread::current().id() == self.loop_thread {
            return self.send(Command::Stop { ack: None });
        }

        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(Command::Stop { ack: Some(ack_tx) })?;
        ack_rx.recv().map_err(|_| AppError::TimerLoopClosed)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.send(Command::Clear)
    }

    /// Ask the loop to exit. Does not wait; see [`TimerLoop::join`].
    pub fn shutdown(&self) -> Result<(), AppError> {
        self.send(Command::Shutdown)
    }

    fn send(&self, command: Command) -> Result<(), AppError> {
        self.tx.send(command).map_err(|_| AppError::TimerLoopClosed)
    }
}

/// A [`TrackingTimer`] running on its own thread.
#[derive(Debug)]
pub struct TimerLoop {
    handle: TimerHandle,
    thread: JoinHandle<TrackingTimer>,
}

impl TimerLoop {
    pub fn spawn(timer: TrackingTimer) -> Result<Self, AppError> {
        let (tx, rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("worktimer-loop".into())
            .spawn(move || run(timer, &rx))?;
        let handle = TimerHandle {
            tx,
            loop_thread: thread.thread().id(),
        };
        Ok(Self { handle, thread })
    }

    pub fn handle(&self) -> TimerHandle {
        self.handle.clone()
    }

    /// Shut the loop down and hand the timer back.
    pub fn join(self) -> Result<TrackingTimer, AppError> {
        // The loop may already be gone; joining reports that below.
        let _ = self.handle.shutdown();
        self.thread.join().map_err(|_| {
            warn!("Timer loop thread panicked");
            AppError::TimerLoopClosed
        })
    }
}

fn run(mut timer: TrackingTimer, rx: &Receiver<Command>) -> TrackingTimer {
    debug!("Timer loop started");
    loop {
        let received = match timer.next_deadline() {
            Some(due) => match rx.recv_timeout(due.saturating_duration_since(Instant::now())) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            },
        };

        if let Some(command) = received {
            if !apply(&mut timer, command) {
                break;
            }
        }
        timer.poll(Instant::now());
    }

    timer.stop();
    debug!("Timer loop exited");
    timer
}

/// Returns false when the loop should exit.
fn apply(timer: &mut TrackingTimer, command: Command) -> bool {
    match command {
        Command::Start { period_ms } => timer.start(period_ms),
        Command::Stop { ack } => {
            timer.stop();
            if let Some(ack) = ack {
                // The caller may have given up waiting; nothing to do then.
                let _ = ack.send(());
            }
        }
        Command::Clear => timer.clear(),
        Command::Shutdown => return false,
    }
    true
}
