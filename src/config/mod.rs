//! Configuration for loading employee data and running reports.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Default number of rows per Arrow batch when reading input files
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Default dataset size above which grouping runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 50_000;

/// Environment variable overriding the configured batch size
pub const BATCH_SIZE_ENV: &str = "HR_ATTRITION_BATCH_SIZE";

/// What to do when an input row fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Stop loading and return the first invalid record error
    #[default]
    Abort,
    /// Drop the row, count it, and keep loading
    Skip,
}

/// Configuration for the analytics engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// How invalid input rows are handled
    pub invalid_record_policy: InvalidRecordPolicy,
    /// Rows per Arrow batch when reading files
    pub batch_size: usize,
    /// Minimum dataset size for parallel aggregation
    pub parallel_threshold: usize,
    /// How many skipped-record errors to keep in the load summary
    pub max_reported_errors: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            invalid_record_policy: InvalidRecordPolicy::Abort,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_reported_errors: 20,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(batch_size) = std::env::var(BATCH_SIZE_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.batch_size = batch_size;
        }
        self
    }

    /// Skip invalid records instead of aborting
    #[must_use]
    pub const fn skipping_invalid(mut self) -> Self {
        self.invalid_record_policy = InvalidRecordPolicy::Skip;
        self
    }

    /// Check that the configuration values are usable
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(AnalyticsError::Config(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for AnalyticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analytics Configuration:")?;
        writeln!(f, "  Invalid Records: {:?}", self.invalid_record_policy)?;
        writeln!(f, "  Batch Size: {}", self.batch_size)?;
        writeln!(f, "  Parallel Threshold: {}", self.parallel_threshold)?;
        writeln!(f, "  Max Reported Errors: {}", self.max_reported_errors)
    }
}
