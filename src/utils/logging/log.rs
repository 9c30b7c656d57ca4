//! Logging helpers
//!
//! Loading and report runs log through these functions so that start,
//! completion and warning lines share one format.

use std::path::Path;
use std::time::Duration;

use crate::dataset::LoadSummary;

/// Initialise `env_logger`, honouring `RUST_LOG` and falling back to `default_filter`
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_logging(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

/// Log the start of an operation on a file
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - File being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of an operation on a file
///
/// # Arguments
/// * `operation` - Past-tense verb for the operation
/// * `path` - File that was operated on
/// * `items` - Number of records or tables handled
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} items from {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        ),
        None => log::info!(
            "Successfully {} {} items from {}",
            operation,
            items,
            path.display()
        ),
    }
}

/// Log a warning, optionally tied to a file
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log the outcome of a load
///
/// Individual skipped rows are logged as they are rejected; this reports the
/// totals.
pub fn log_load_summary(summary: &LoadSummary) {
    let source = summary
        .source
        .as_deref()
        .map_or_else(|| "memory".to_string(), |p| p.display().to_string());

    if summary.skipped == 0 {
        log::debug!("Accepted all {} rows from {source}", summary.loaded);
    } else {
        log::warn!(
            "Loaded {} of {} rows from {source}; {} invalid rows skipped",
            summary.loaded,
            summary.total_rows,
            summary.skipped
        );
    }
}
