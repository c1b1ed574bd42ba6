use crate::error::AppError;
use tracing_subscriber::EnvFilter;

/// Targets that make up this crate's own logs.
const OUR_TARGETS: &[&str] = &["worktimer", "worktimer_lib"];

const DEFAULT_LEVEL: &str = "info";

/// Filter directive setting `level` for our targets only.
pub fn level_spec_for(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    OUR_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Precedence: explicit `level`, then `RUST_LOG`, then `info` for our targets.
fn build_filter(level: Option<&str>) -> Result<EnvFilter, AppError> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level_spec_for(level)).map_err(|e| AppError::InvalidInput {
                field: "log_level",
                reason: e.to_string(),
            })
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level_spec_for(DEFAULT_LEVEL)))),
    }
}

/// Install the stderr subscriber. `log` records are bridged into it.
///
/// Calling this twice is harmless; the first subscriber stays.
pub fn init(level: Option<&str>) -> Result<(), AppError> {
    let filter = build_filter(level)?;
    // Fails only if a global subscriber is already set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}
