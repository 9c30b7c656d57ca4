//! Employee dataset loading
//!
//! Turns Arrow record batches into validated `EmployeeRecord`s and assembles
//! them into a `Dataset`. Columns are cast to the expected types first, so a
//! row fails only when one of its own values is missing or out of range.
//! Integer columns stored as floats or decimals keep their source values, so a
//! fractional value fails its row instead of being truncated.

use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, AsArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;

use crate::config::AnalyticsConfig;
use crate::dataset::{Dataset, DatasetBuilder};
use crate::error::{AnalyticsError, Result};
use crate::models::EmployeeRecord;
use crate::models::types::{Attrition, parse_flag};
use crate::reader::read_batches;
use crate::schema::{columns, ensure_employee_schema};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Load a Parquet or CSV employee table into a dataset
pub fn load_dataset(path: &Path, config: &AnalyticsConfig) -> Result<Dataset> {
    config.validate()?;
    log_operation_start("Loading employee dataset from", path);
    let start = Instant::now();

    let batches = read_batches(path, config.batch_size)?;
    let mut builder = DatasetBuilder::new(config).with_source(path);
    for batch in &batches {
        push_batch(&mut builder, batch)?;
    }
    let dataset = builder.finish();

    log_operation_complete("loaded", path, dataset.len(), Some(start.elapsed()));
    Ok(dataset)
}

/// Build a dataset from record batches that are already in memory
pub fn dataset_from_batches(batches: &[RecordBatch], config: &AnalyticsConfig) -> Result<Dataset> {
    let mut builder = DatasetBuilder::new(config);
    for batch in batches {
        push_batch(&mut builder, batch)?;
    }
    Ok(builder.finish())
}

/// Extract every row of `batch` and feed it to the builder
pub fn push_batch(builder: &mut DatasetBuilder, batch: &RecordBatch) -> Result<()> {
    let columns = EmployeeColumns::from_batch(batch)?;
    for row in 0..batch.num_rows() {
        let index = builder.next_row();
        builder.push(columns.record(row, index))?;
    }
    Ok(())
}

/// Employee columns of one batch, cast to their canonical types
struct EmployeeColumns {
    employee_number: IntColumn,
    age: IntColumn,
    attrition: StringArray,
    department: StringArray,
    job_role: StringArray,
    job_level: IntColumn,
    gender: StringArray,
    marital_status: StringArray,
    education_field: StringArray,
    overtime: StringArray,
    performance_rating: IntColumn,
    work_life_balance: IntColumn,
    environment_satisfaction: IntColumn,
    monthly_income: IntColumn,
    years_at_company: IntColumn,
    years_since_last_promotion: IntColumn,
    distance_from_home: IntColumn,
    training_times_last_year: IntColumn,
}

impl EmployeeColumns {
    fn from_batch(batch: &RecordBatch) -> Result<Self> {
        ensure_employee_schema(&batch.schema())?;

        Ok(Self {
            employee_number: int_column(batch, columns::EMPLOYEE_NUMBER)?,
            age: int_column(batch, columns::AGE)?,
            attrition: text_column(batch, columns::ATTRITION)?,
            department: text_column(batch, columns::DEPARTMENT)?,
            job_role: text_column(batch, columns::JOB_ROLE)?,
            job_level: int_column(batch, columns::JOB_LEVEL)?,
            gender: text_column(batch, columns::GENDER)?,
            marital_status: text_column(batch, columns::MARITAL_STATUS)?,
            education_field: text_column(batch, columns::EDUCATION_FIELD)?,
            overtime: text_column(batch, columns::OVER_TIME)?,
            performance_rating: int_column(batch, columns::PERFORMANCE_RATING)?,
            work_life_balance: int_column(batch, columns::WORK_LIFE_BALANCE)?,
            environment_satisfaction: int_column(batch, columns::ENVIRONMENT_SATISFACTION)?,
            monthly_income: int_column(batch, columns::MONTHLY_INCOME)?,
            years_at_company: int_column(batch, columns::YEARS_AT_COMPANY)?,
            years_since_last_promotion: int_column(batch, columns::YEARS_SINCE_LAST_PROMOTION)?,
            distance_from_home: int_column(batch, columns::DISTANCE_FROM_HOME)?,
            training_times_last_year: int_column(batch, columns::TRAINING_TIMES_LAST_YEAR)?,
        })
    }

    /// Build the record at `row`; `index` is the row's position in the whole input
    fn record(&self, row: usize, index: usize) -> Result<EmployeeRecord> {
        let mut cursor = RowCursor {
            row,
            index,
            employee_number: None,
        };
        cursor.employee_number = Some(cursor.int(&self.employee_number, columns::EMPLOYEE_NUMBER)?);

        let attrition_text = cursor.text(&self.attrition, columns::ATTRITION)?;
        let attrition = Attrition::parse(&attrition_text).ok_or_else(|| {
            cursor.invalid(format!("Attrition value '{attrition_text}' is not a 0/1 or Yes/No flag"))
        })?;

        let overtime_text = cursor.text(&self.overtime, columns::OVER_TIME)?;
        let overtime = parse_flag(&overtime_text).ok_or_else(|| {
            cursor.invalid(format!("OverTime value '{overtime_text}' is not a Yes/No flag"))
        })?;

        Ok(EmployeeRecord {
            employee_number: cursor.employee_number.unwrap_or_default(),
            age: cursor.int(&self.age, columns::AGE)?,
            attrition,
            department: cursor.text(&self.department, columns::DEPARTMENT)?,
            job_role: cursor.text(&self.job_role, columns::JOB_ROLE)?,
            job_level: cursor.int(&self.job_level, columns::JOB_LEVEL)?,
            gender: cursor.text(&self.gender, columns::GENDER)?,
            marital_status: cursor.text(&self.marital_status, columns::MARITAL_STATUS)?,
            education_field: cursor.text(&self.education_field, columns::EDUCATION_FIELD)?,
            overtime,
            performance_rating: cursor.int(&self.performance_rating, columns::PERFORMANCE_RATING)?,
            work_life_balance: cursor.int(&self.work_life_balance, columns::WORK_LIFE_BALANCE)?,
            environment_satisfaction: cursor
                .int(&self.environment_satisfaction, columns::ENVIRONMENT_SATISFACTION)?,
            monthly_income: cursor.int(&self.monthly_income, columns::MONTHLY_INCOME)?,
            years_at_company: cursor.int(&self.years_at_company, columns::YEARS_AT_COMPANY)?,
            years_since_last_promotion: cursor
                .int(&self.years_since_last_promotion, columns::YEARS_SINCE_LAST_PROMOTION)?,
            distance_from_home: cursor.int(&self.distance_from_home, columns::DISTANCE_FROM_HOME)?,
            training_times_last_year: cursor
                .int(&self.training_times_last_year, columns::TRAINING_TIMES_LAST_YEAR)?,
        })
    }
}

/// An integer column cast to `Int64`, with the source values kept when the
/// cast could drop a fractional part
struct IntColumn {
    values: Int64Array,
    source: Option<Float64Array>,
}

impl IntColumn {
    /// The non-integral value at `row`, if any
    fn fractional(&self, row: usize) -> Option<f64> {
        let source = self.source.as_ref()?;
        if source.is_null(row) {
            return None;
        }
        let value = source.value(row);
        (!value.is_finite() || value.fract() != 0.0).then_some(value)
    }
}

/// Reads values of one row and builds row-scoped errors
struct RowCursor {
    row: usize,
    index: usize,
    employee_number: Option<u32>,
}

impl RowCursor {
    fn invalid(&self, reason: String) -> AnalyticsError {
        AnalyticsError::invalid_record(self.index, self.employee_number, reason)
    }

    fn int<T: TryFrom<i64>>(&self, column_values: &IntColumn, column: &str) -> Result<T> {
        if let Some(value) = column_values.fractional(self.row) {
            return Err(self.invalid(format!("{column} value {value} is not a whole number")));
        }
        let array = &column_values.values;
        if array.is_null(self.row) {
            return Err(self.invalid(format!("{column} is missing or not numeric")));
        }
        let value = array.value(self.row);
        T::try_from(value).map_err(|_| self.invalid(format!("{column} value {value} is out of range")))
    }

    fn text(&self, array: &StringArray, column: &str) -> Result<String> {
        if array.is_null(self.row) {
            return Err(self.invalid(format!("{column} is missing")));
        }
        Ok(array.value(self.row).trim().to_string())
    }
}

fn int_column(batch: &RecordBatch, name: &str) -> Result<IntColumn> {
    let idx = batch.schema().index_of(name)?;
    let column = batch.column(idx);
    let source = match column.data_type() {
        DataType::Decimal128(..) | DataType::Decimal256(..) => true,
        other => other.is_floating(),
    }
    .then(|| cast(column, &DataType::Float64))
    .transpose()?
    .map(|array| array.as_primitive::<Float64Type>().clone());

    let values = cast(column, &DataType::Int64)?;
    Ok(IntColumn {
        values: values.as_primitive::<Int64Type>().clone(),
        source,
    })
}

fn text_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let idx = batch.schema().index_of(name)?;
    let array = cast(batch.column(idx), &DataType::Utf8)?;
    Ok(array.as_string::<i32>().clone())
}
