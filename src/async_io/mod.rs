//! Asynchronous dataset loading
//!
//! Parquet files are streamed batch by batch with the async Arrow reader, so
//! rows are validated while later batches are still being decoded. CSV has no
//! async reader and is loaded on the blocking thread pool.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::TryStreamExt;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;
use tokio::fs::File;

use crate::config::AnalyticsConfig;
use crate::dataset::{Dataset, DatasetBuilder};
use crate::error::Result;
use crate::loader::{load_dataset, push_batch};
use crate::reader::InputFormat;
use crate::schema::{employee_projection, ensure_employee_schema};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Open a file asynchronously, adding the path to the error message
pub async fn open_file_async(path: &Path) -> Result<File> {
    File::open(path).await.map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to open {}: {e}", path.display())).into()
    })
}

/// Load a Parquet or CSV employee table without blocking the runtime
pub async fn load_dataset_async(path: &Path, config: &AnalyticsConfig) -> Result<Dataset> {
    match InputFormat::from_path(path)? {
        InputFormat::Parquet => load_parquet_async(path, config).await,
        InputFormat::Csv => {
            let owned: PathBuf = path.to_path_buf();
            let config = config.clone();
            tokio::task::spawn_blocking(move || load_dataset(&owned, &config))
                .await
                .map_err(|e| io::Error::other(format!("CSV loading task failed: {e}")))?
        }
    }
}

/// Stream a Parquet file into a dataset
pub async fn load_parquet_async(path: &Path, config: &AnalyticsConfig) -> Result<Dataset> {
    config.validate()?;
    log_operation_start("Streaming employee dataset from", path);
    let start = Instant::now();

    let file = open_file_async(path).await?;
    let mut builder = ParquetRecordBatchStreamBuilder::new(file).await?;
    ensure_employee_schema(builder.schema())?;

    if let Some(mask) = employee_projection(builder.schema(), builder.parquet_schema()) {
        builder = builder.with_projection(mask);
    }

    let mut stream = builder.with_batch_size(config.batch_size).build()?;
    let mut dataset = DatasetBuilder::new(config).with_source(path);
    let mut batches = 0usize;
    while let Some(batch) = stream.try_next().await? {
        push_batch(&mut dataset, &batch)?;
        batches += 1;
    }
    log::debug!("Streamed {batches} batches from {}", path.display());

    let dataset = dataset.finish();
    log_operation_complete("streamed", path, dataset.len(), Some(start.elapsed()));
    Ok(dataset)
}
