//! Reading employee tables from Parquet and CSV files into Arrow batches.

use std::fs::File;
use std::io::{self, Seek};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::Result;
use crate::schema::{employee_projection, ensure_employee_schema};

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Apache Parquet
    Parquet,
    /// Comma-separated values with a header row
    Csv,
}

impl InputFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("parquet" | "pq") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Unsupported input file {} (expected .parquet or .csv)",
                    path.display()
                ),
            )
            .into()),
        }
    }
}

/// Open a file, adding the path to the error message
pub fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to open {}: {e}", path.display())).into()
    })
}

/// Read an input file into record batches, choosing the reader by extension
pub fn read_batches(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    match InputFormat::from_path(path)? {
        InputFormat::Parquet => read_parquet(path, batch_size),
        InputFormat::Csv => read_csv(path, batch_size),
    }
}

/// Read only the schema of an input file
///
/// For CSV the column types are inferred from the whole file.
pub fn read_schema(path: &Path) -> Result<Schema> {
    match InputFormat::from_path(path)? {
        InputFormat::Parquet => {
            let builder = ParquetRecordBatchReaderBuilder::try_new(open_file(path)?)?;
            Ok(builder.schema().as_ref().clone())
        }
        InputFormat::Csv => {
            let mut file = open_file(path)?;
            let (schema, _) = Format::default()
                .with_header(true)
                .infer_schema(&mut file, None)?;
            Ok(schema)
        }
    }
}

/// Read a Parquet file, projecting to the employee columns
///
/// The file schema is checked before any row group is decoded, so a file
/// without rows still fails when columns are missing.
pub fn read_parquet(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let file = open_file(path)?;
    let mut builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    ensure_employee_schema(builder.schema())?;

    if let Some(mask) = employee_projection(builder.schema(), builder.parquet_schema()) {
        builder = builder.with_projection(mask);
    }

    let reader = builder.with_batch_size(batch_size).build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    log::debug!(
        "Read {} batches from parquet file {}",
        batches.len(),
        path.display()
    );
    Ok(batches)
}

/// Read a CSV file with a header row
///
/// Column types are inferred from the whole file; the record extraction step
/// casts them to the employee schema afterwards. The header is checked for the
/// employee columns before any row is read.
pub fn read_csv(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let mut file = open_file(path)?;
    let format = Format::default().with_header(true);
    let (schema, rows) = format.infer_schema(&mut file, None)?;
    ensure_employee_schema(&schema)?;
    file.rewind()?;

    log::debug!(
        "Inferred {} columns from {} CSV rows in {}",
        schema.fields().len(),
        rows,
        path.display()
    );

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .with_batch_size(batch_size)
        .build(file)?;

    Ok(reader.collect::<std::result::Result<Vec<_>, _>>()?)
}
