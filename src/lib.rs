//! A Rust library for computing HR attrition analytics over employee tables.
//!
//! Employee records are loaded from Parquet or CSV into an immutable
//! [`Dataset`], and a fixed catalogue of named reports (attrition rates,
//! averages, headcounts and compensation outliers) is computed over it.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod models;
pub mod reader;
pub mod report;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{AnalyticsConfig, InvalidRecordPolicy};
pub use dataset::{Dataset, DatasetBuilder, LoadSummary};
pub use error::{AnalyticsError, Result};
pub use models::{AgeBand, Attrition, Cell, CellKind, Column, EmployeeRecord, ReportTable};

// Analytics
pub use algorithm::{
    Dimension, Measure, OutlierVariant, SortOrder, attrition_rate, average_by,
    bucketize_age, compensation_outliers, count_by, mean_of, most_common_by,
    overall_attrition_rate, promotion_wait_by_role,
};
pub use report::{CATALOGUE, ReportSpec, find_report, report_names, run_all, run_report, run_reports};

// Loading
pub use async_io::load_dataset_async;
pub use loader::{dataset_from_batches, load_dataset};

// Arrow types
pub use arrow::record_batch::RecordBatch;
