use crate::constants::DEFAULT_PERIOD_MS;
use crate::error::AppError;
use crate::models::WatchList;
use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Front-end settings read at startup. Never written back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub watch_list: Vec<String>,
    pub period_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            watch_list: Vec::new(),
            period_ms: DEFAULT_PERIOD_MS,
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&raw).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded config from {} ({} watched titles)",
            path.display(),
            config.watch_list.len()
        );
        Ok(config)
    }

    /// Command-line values win over the file. An empty `watch` keeps the
    /// file's list.
    #[must_use]
    pub fn with_overrides(mut self, watch: Vec<String>, period_ms: Option<u64>) -> Self {
        if !watch.is_empty() {
            self.watch_list = watch;
        }
        if let Some(period_ms) = period_ms {
            self.period_ms = period_ms;
        }
        self
    }

    pub fn build_watch_list(&self) -> Result<WatchList, AppError> {
        WatchList::try_from_titles(&self.watch_list)
    }

    /// Period as accepted by `TrackingTimer::start`.
    pub fn period_ms_signed(&self) -> i64 {
        i64::try_from(self.period_ms).unwrap_or(i64::MAX)
    }
}

/// `<platform config dir>/config.json`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "worktimer", "WorkTimer").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
