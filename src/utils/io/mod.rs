//! Writing report tables and employee records to disk
//!
//! Report tables are converted to Arrow record batches column by column,
//! using each column's `CellKind` for the Arrow type, and then written as
//! JSON, CSV or Parquet.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, FieldRef, Schema};
use parquet::arrow::ArrowWriter;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::Result;
use crate::models::{CellKind, EmployeeRecord, ReportTable};

/// File format for report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object per report
    #[default]
    Json,
    /// CSV with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl OutputFormat {
    /// File extension for the format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

const fn data_type(kind: CellKind) -> DataType {
    match kind {
        CellKind::Text => DataType::Utf8,
        CellKind::Int => DataType::Int64,
        CellKind::Float => DataType::Float64,
    }
}

/// Arrow schema of a report table
#[must_use]
pub fn table_schema(table: &ReportTable) -> Schema {
    Schema::new(
        table
            .columns
            .iter()
            .map(|c| Field::new(&c.name, data_type(c.kind), true))
            .collect::<Vec<_>>(),
    )
}

/// Convert a report table into a single record batch
///
/// A cell whose kind does not match its column becomes null.
pub fn table_to_batch(table: &ReportTable) -> Result<RecordBatch> {
    let arrays: Vec<ArrayRef> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let cells = table.rows.iter().map(|row| row.cells().get(idx));
            let array: ArrayRef = match column.kind {
                CellKind::Text => Arc::new(
                    cells
                        .map(|c| c.and_then(|c| c.as_text()))
                        .collect::<StringArray>(),
                ),
                CellKind::Int => Arc::new(
                    cells
                        .map(|c| c.and_then(|c| c.as_int()))
                        .collect::<Int64Array>(),
                ),
                CellKind::Float => Arc::new(
                    cells
                        .map(|c| c.and_then(|c| c.as_f64()))
                        .collect::<Float64Array>(),
                ),
            };
            array
        })
        .collect();

    Ok(RecordBatch::try_new(Arc::new(table_schema(table)), arrays)?)
}

/// Convert employee records into a record batch via `serde_arrow`
///
/// The schema is traced from the records themselves, or from the type when
/// there are none.
pub fn records_to_batch(records: &[EmployeeRecord]) -> Result<RecordBatch> {
    let fields = if records.is_empty() {
        Vec::<FieldRef>::from_type::<EmployeeRecord>(TracingOptions::default())?
    } else {
        Vec::<FieldRef>::from_samples(records, TracingOptions::default())?
    };
    Ok(serde_arrow::to_record_batch(&fields, &records)?)
}

/// Write a report table as a JSON object
pub fn write_json<W: Write>(table: &ReportTable, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, table)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a report table as CSV with a header row
pub fn write_csv<W: Write>(table: &ReportTable, writer: W) -> Result<()> {
    let batch = table_to_batch(table)?;
    let mut writer = WriterBuilder::new().with_header(true).build(writer);
    writer.write(&batch)?;
    Ok(())
}

/// Write a record batch to a Parquet file
pub fn write_parquet_batch(batch: &RecordBatch, file: File) -> Result<()> {
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Write a report table into `dir` as `<report name>.<ext>`, returning the path
pub fn write_table(table: &ReportTable, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", table.name, format.extension()));
    let file = File::create(&path)?;

    match format {
        OutputFormat::Json => write_json(table, file)?,
        OutputFormat::Csv => write_csv(table, file)?,
        OutputFormat::Parquet => write_parquet_batch(&table_to_batch(table)?, file)?,
    }

    log::debug!("Wrote report {} to {}", table.name, path.display());
    Ok(path)
}

/// Write employee records to a Parquet file
pub fn write_records_parquet(records: &[EmployeeRecord], path: &Path) -> Result<()> {
    let batch = records_to_batch(records)?;
    write_parquet_batch(&batch, File::create(path)?)
}
