//! Keyboard commands for the terminal front end, one per input line.

use crate::error::AppError;
use crate::models::{SharedWatchList, WatchList};
use crate::platform::{unique_window_titles, ActiveWindowProbe};
use crate::tracker::TimerHandle;
use log::info;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, MutexGuard};

pub const HELP: &str = "\
commands:
  s            stop / resume the timer
  r            reset the clock to 00:00:00
  a <title>    watch a window title
  d <title>    stop watching a window title
  l            list watched titles
  w            list open windows
  q            quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Toggle,
    Clear,
    Add(String),
    Remove(String),
    List,
    Windows,
    Quit,
    Help,
}

impl FromStr for UserCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "s" | "stop" | "start" => Self::Toggle,
            "r" | "reset" | "clear" => Self::Clear,
            "a" | "add" => Self::Add(arg.to_string()),
            "d" | "del" | "remove" => Self::Remove(arg.to_string()),
            "l" | "list" => Self::List,
            "w" | "windows" => Self::Windows,
            "q" | "quit" | "exit" => Self::Quit,
            "h" | "help" | "?" => Self::Help,
            other => {
                return Err(AppError::InvalidInput {
                    field: "command",
                    reason: format!("unknown command '{other}' (try 'h')"),
                })
            }
        };
        Ok(command)
    }
}

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies user commands to the timer and the watch list.
pub struct Controller {
    timer: TimerHandle,
    watch_list: SharedWatchList,
    probe: Arc<dyn ActiveWindowProbe>,
    period_ms: i64,
    running: bool,
}

impl Controller {
    /// `running` is whether the timer was already started with `period_ms`.
    pub fn new(
        timer: TimerHandle,
        watch_list: SharedWatchList,
        probe: Arc<dyn ActiveWindowProbe>,
        period_ms: i64,
        running: bool,
    ) -> Self {
        Self {
            timer,
            watch_list,
            probe,
            period_ms,
            running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn lock_watch_list(&self) -> Result<MutexGuard<'_, WatchList>, AppError> {
        self.watch_list.lock().map_err(|_| AppError::LockPoisoned)
    }

    pub fn execute<W: Write>(
        &mut self,
        command: UserCommand,
        out: &mut W,
    ) -> Result<Flow, AppError> {
        match command {
            UserCommand::Toggle => {
                if self.running {
                    self.timer.stop()?;
                    self.running = false;
                    writeln!(out, "\nstopped")?;
                } else {
                    self.timer.start(self.period_ms)?;
                    self.running = true;
                    writeln!(out, "\nresumed")?;
                }
            }
            UserCommand::Clear => self.timer.clear()?,
            UserCommand::Add(title) => {
                self.lock_watch_list()?.add(&title)?;
                info!("Watching {:?}", title.trim());
                writeln!(out, "\nwatching: {}", title.trim())?;
            }
            UserCommand::Remove(title) => {
                self.lock_watch_list()?.remove(&title)?;
                info!("No longer watching {:?}", title.trim());
                writeln!(out, "\nremoved: {}", title.trim())?;
            }
            UserCommand::List => {
                let list = self.lock_watch_list()?;
                writeln!(out)?;
                if list.is_empty() {
                    writeln!(out, "(watch list is empty)")?;
                }
                for (i, title) in list.titles().iter().enumerate() {
                    writeln!(out, "{}. {title}", i + 1)?;
                }
            }
            UserCommand::Windows => {
                writeln!(out)?;
                for title in unique_window_titles(self.probe.as_ref()) {
                    writeln!(out, "{title}")?;
                }
            }
            UserCommand::Help => writeln!(out, "\n{HELP}")?,
            UserCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Parse and execute one input line. Bad input is reported to `out`
    /// rather than ending the session.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let result = line
            .parse::<UserCommand>()
            .and_then(|command| self.execute(command, out));
        match result {
            Ok(flow) => Ok(flow),
            Err(AppError::Io(e)) => Err(e),
            Err(AppError::TimerLoopClosed) => Ok(Flow::Quit),
            Err(e) => {
                writeln!(out, "\nerror: {e}")?;
                Ok(Flow::Continue)
            }
        }
    }
}
