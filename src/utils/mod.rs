//! Utility functions for logging, progress reporting and report output

pub mod io;
pub mod logging;

// Re-export commonly used items for convenience
pub use io::{OutputFormat, records_to_batch, table_to_batch, write_table};
pub use logging::{log_operation_complete, log_operation_start, log_warning};
