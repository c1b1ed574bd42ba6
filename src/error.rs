use std::path::PathBuf;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("'{title}' is already being watched")]
    AlreadyExists { title: String },

    #[error("'{title}' is not being watched")]
    NotFound { title: String },

    #[error("Watch list is full (max {capacity} titles)")]
    WatchListFull { capacity: usize },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Config error in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timer loop has shut down")]
    TimerLoopClosed,

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Failures inside a window probe.
///
/// Never crosses the probe boundary: every probe turns these into an empty
/// result and logs them.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no display connection")]
    NoDisplay,

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ScriptFailed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("{program} did not finish within {timeout_ms} ms")]
    TimedOut { program: &'static str, timeout_ms: u64 },

    #[error("output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("window system query failed: {0}")]
    Query(String),
}
