use crate::constants::{MAX_PERIOD_MS, MAX_TITLE_LEN, MIN_PERIOD_MS};
use crate::error::AppError;

/// Clamp a requested tick period to a schedulable value.
/// Non-positive periods become `MIN_PERIOD_MS`; huge ones `MAX_PERIOD_MS`.
pub fn clamp_period_ms(period_ms: i64) -> u64 {
    u64::try_from(period_ms)
        .unwrap_or(MIN_PERIOD_MS)
        .clamp(MIN_PERIOD_MS, MAX_PERIOD_MS)
}

/// Whether `clamp_period_ms` would change the value.
pub fn is_valid_period_ms(period_ms: i64) -> bool {
    u64::try_from(period_ms).is_ok_and(|p| (MIN_PERIOD_MS..=MAX_PERIOD_MS).contains(&p))
}

/// Validate a window title before it goes into the watch list.
/// Returns the trimmed title.
pub fn validate_window_title(title: &str) -> Result<&str, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput {
            field: "title",
            reason: "cannot be empty".into(),
        });
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::InvalidInput {
            field: "title",
            reason: format!("cannot exceed {MAX_TITLE_LEN} characters"),
        });
    }
    Ok(title)
}
