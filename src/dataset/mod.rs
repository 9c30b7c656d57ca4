//! Immutable employee dataset snapshot
//!
//! A `Dataset` is built once, through `DatasetBuilder`, and then shared by
//! reference with every report. The builder applies the invalid-record
//! policy and the dataset-level uniqueness check on employee numbers.

use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::config::{AnalyticsConfig, InvalidRecordPolicy};
use crate::error::{AnalyticsError, Result};
use crate::models::EmployeeRecord;
use crate::utils::logging::log_load_summary;

/// Outcome of loading a dataset
#[derive(Debug, Default)]
pub struct LoadSummary {
    /// File the dataset was read from, if any
    pub source: Option<PathBuf>,
    /// Number of input rows seen
    pub total_rows: usize,
    /// Number of records kept
    pub loaded: usize,
    /// Number of rows dropped in skip mode
    pub skipped: usize,
    /// The first skipped-record errors, up to the configured limit
    pub errors: Vec<AnalyticsError>,
}

/// Read-only snapshot of validated employee records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[EmployeeRecord]>,
    summary: Arc<LoadSummary>,
}

impl Dataset {
    /// Build a dataset from in-memory records, validating each one
    pub fn from_records(records: Vec<EmployeeRecord>, config: &AnalyticsConfig) -> Result<Self> {
        let mut builder = DatasetBuilder::new(config);
        for record in records {
            builder.push(Ok(record))?;
        }
        Ok(builder.finish())
    }

    /// An empty dataset
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            summary: Arc::new(LoadSummary::default()),
        }
    }

    /// The records in input order
    #[must_use]
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Load statistics
    #[must_use]
    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }

    /// Number of rows skipped as invalid while loading
    #[must_use]
    pub fn skipped_records(&self) -> usize {
        self.summary.skipped
    }
}

impl Deref for Dataset {
    type Target = [EmployeeRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// Incrementally validates records and assembles a `Dataset`
#[derive(Debug)]
pub struct DatasetBuilder {
    policy: InvalidRecordPolicy,
    max_reported_errors: usize,
    records: Vec<EmployeeRecord>,
    seen: FxHashSet<u32>,
    summary: LoadSummary,
}

impl DatasetBuilder {
    /// Create a builder using the policy from `config`
    #[must_use]
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            policy: config.invalid_record_policy,
            max_reported_errors: config.max_reported_errors,
            records: Vec::new(),
            seen: FxHashSet::default(),
            summary: LoadSummary::default(),
        }
    }

    /// Record the file the rows come from
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.summary.source = Some(source.into());
        self
    }

    /// Index the next pushed row will get
    #[must_use]
    pub const fn next_row(&self) -> usize {
        self.summary.total_rows
    }

    /// Add one input row
    ///
    /// `Err` values are extraction failures from the reader. In abort mode the
    /// first invalid row is returned as the error; in skip mode it is counted.
    pub fn push(&mut self, record: Result<EmployeeRecord>) -> Result<()> {
        let row = self.summary.total_rows;
        self.summary.total_rows += 1;

        match record.and_then(|r| self.check(row, r)) {
            Ok(record) => {
                self.seen.insert(record.employee_number);
                self.records.push(record);
                Ok(())
            }
            Err(err) if err.is_record_error() => self.reject(err),
            Err(err) => Err(err),
        }
    }

    fn check(&self, row: usize, record: EmployeeRecord) -> Result<EmployeeRecord> {
        record.validate().map_err(|reason| {
            AnalyticsError::invalid_record(row, Some(record.employee_number), reason)
        })?;

        if self.seen.contains(&record.employee_number) {
            return Err(AnalyticsError::invalid_record(
                row,
                Some(record.employee_number),
                "duplicate EmployeeNumber",
            ));
        }

        Ok(record)
    }

    fn reject(&mut self, err: AnalyticsError) -> Result<()> {
        match self.policy {
            InvalidRecordPolicy::Abort => Err(err),
            InvalidRecordPolicy::Skip => {
                log::warn!("Skipping {err}");
                self.summary.skipped += 1;
                if self.summary.errors.len() < self.max_reported_errors {
                    self.summary.errors.push(err);
                }
                Ok(())
            }
        }
    }

    /// Freeze the collected records into a dataset
    #[must_use]
    pub fn finish(mut self) -> Dataset {
        self.summary.loaded = self.records.len();
        log_load_summary(&self.summary);
        Dataset {
            records: Arc::from(self.records),
            summary: Arc::new(self.summary),
        }
    }
}
