//! Logging utilities for operation tracking and progress display

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{init_logging, log_load_summary, log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
