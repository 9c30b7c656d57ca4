//! Employee table schema and compatibility checks.
//!
//! Input files only need to contain the required columns; extra columns are
//! ignored and differing column types are cast when records are extracted.

use arrow::datatypes::{DataType, Field, Schema};
use itertools::Itertools;
use parquet::arrow::ProjectionMask;
use parquet::schema::types::SchemaDescriptor;

use crate::error::{AnalyticsError, Result};

/// Column names of the employee table
pub mod columns {
    pub const EMPLOYEE_NUMBER: &str = "EmployeeNumber";
    pub const AGE: &str = "Age";
    pub const ATTRITION: &str = "Attrition";
    pub const DEPARTMENT: &str = "Department";
    pub const JOB_ROLE: &str = "JobRole";
    pub const JOB_LEVEL: &str = "JobLevel";
    pub const GENDER: &str = "Gender";
    pub const MARITAL_STATUS: &str = "MaritalStatus";
    pub const EDUCATION_FIELD: &str = "EducationField";
    pub const OVER_TIME: &str = "OverTime";
    pub const PERFORMANCE_RATING: &str = "PerformanceRating";
    pub const WORK_LIFE_BALANCE: &str = "WorkLifeBalance";
    pub const ENVIRONMENT_SATISFACTION: &str = "EnvironmentSatisfaction";
    pub const MONTHLY_INCOME: &str = "MonthlyIncome";
    pub const YEARS_AT_COMPANY: &str = "YearsAtCompany";
    pub const YEARS_SINCE_LAST_PROMOTION: &str = "YearsSinceLastPromotion";
    pub const DISTANCE_FROM_HOME: &str = "DistanceFromHome";
    pub const TRAINING_TIMES_LAST_YEAR: &str = "TrainingTimesLastYear";
}

/// Canonical schema of the employee table
///
/// `Attrition` and `OverTime` are read as text so that both `Yes`/`No` and
/// `1`/`0` encodings load.
#[must_use]
pub fn employee_schema() -> Schema {
    use columns::*;

    Schema::new(vec![
        Field::new(EMPLOYEE_NUMBER, DataType::Int64, false),
        Field::new(AGE, DataType::Int64, false),
        Field::new(ATTRITION, DataType::Utf8, false),
        Field::new(DEPARTMENT, DataType::Utf8, false),
        Field::new(JOB_ROLE, DataType::Utf8, false),
        Field::new(JOB_LEVEL, DataType::Int64, false),
        Field::new(GENDER, DataType::Utf8, false),
        Field::new(MARITAL_STATUS, DataType::Utf8, false),
        Field::new(EDUCATION_FIELD, DataType::Utf8, false),
        Field::new(OVER_TIME, DataType::Utf8, false),
        Field::new(PERFORMANCE_RATING, DataType::Int64, false),
        Field::new(WORK_LIFE_BALANCE, DataType::Int64, false),
        Field::new(ENVIRONMENT_SATISFACTION, DataType::Int64, false),
        Field::new(MONTHLY_INCOME, DataType::Int64, false),
        Field::new(YEARS_AT_COMPANY, DataType::Int64, false),
        Field::new(YEARS_SINCE_LAST_PROMOTION, DataType::Int64, false),
        Field::new(DISTANCE_FROM_HOME, DataType::Int64, false),
        Field::new(TRAINING_TIMES_LAST_YEAR, DataType::Int64, false),
    ])
}

/// Result of comparing a file schema with the employee schema
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// Whether every required column is present
    pub compatible: bool,
    /// Missing columns and type differences
    pub issues: Vec<SchemaIssue>,
}

/// A single schema difference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Column the issue concerns
    pub column: String,
    /// Description of the difference
    pub description: String,
    /// Whether the difference prevents loading
    pub fatal: bool,
}

/// Compare a file schema with the employee schema
#[must_use]
pub fn check_employee_schema(file_schema: &Schema) -> SchemaCompatibilityReport {
    let expected = employee_schema();
    let mut issues = Vec::new();

    for field in expected.fields() {
        match file_schema.field_with_name(field.name()) {
            Err(_) => issues.push(SchemaIssue {
                column: field.name().clone(),
                description: "column is missing".to_string(),
                fatal: true,
            }),
            Ok(found) if found.data_type() != field.data_type() => issues.push(SchemaIssue {
                column: field.name().clone(),
                description: format!(
                    "found {}, will be cast to {}",
                    found.data_type(),
                    field.data_type()
                ),
                fatal: false,
            }),
            Ok(_) => {}
        }
    }

    SchemaCompatibilityReport {
        compatible: !issues.iter().any(|i| i.fatal),
        issues,
    }
}

/// Fail with a schema error when required columns are missing
pub fn ensure_employee_schema(file_schema: &Schema) -> Result<()> {
    let report = check_employee_schema(file_schema);
    for issue in report.issues.iter().filter(|i| !i.fatal) {
        log::debug!("Column {}: {}", issue.column, issue.description);
    }

    if report.compatible {
        Ok(())
    } else {
        let missing = report
            .issues
            .iter()
            .filter(|i| i.fatal)
            .map(|i| i.column.as_str())
            .join(", ");
        Err(AnalyticsError::Schema(format!(
            "missing required columns: {missing}"
        )))
    }
}

/// Build a Parquet projection that reads only the employee columns
///
/// Returns `None` when no column of the file matches; callers run
/// `ensure_employee_schema` first, which rejects such a file.
#[must_use]
pub fn employee_projection(
    file_schema: &Schema,
    parquet_schema: &SchemaDescriptor,
) -> Option<ProjectionMask> {
    let projection: Vec<usize> = employee_schema()
        .fields()
        .iter()
        .filter_map(|f| file_schema.index_of(f.name()).ok())
        .sorted_unstable()
        .collect();

    if projection.is_empty() {
        None
    } else {
        Some(ProjectionMask::roots(parquet_schema, projection))
    }
}
