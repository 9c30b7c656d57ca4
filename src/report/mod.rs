//! Named report catalogue
//!
//! Each report has a stable snake_case name, a fixed column list and a fixed
//! row order. The dashboard layer addresses reports only by name, so names and
//! column headers here must not change.

use std::time::Instant;

use crate::algorithm::{
    Dimension, GroupBy, Measure, OutlierVariant, SortOrder, compensation_outliers,
    most_common_of, overall_attrition_rate,
};
use crate::config::AnalyticsConfig;
use crate::dataset::Dataset;
use crate::error::{AnalyticsError, Result};
use crate::models::{Cell, CellKind, Column, EmployeeRecord, ReportTable};

/// Header of the group size column
pub const TOTAL_COLUMN: &str = "Total_Employee";
/// Header of the leaver count column
pub const LEFT_COLUMN: &str = "Employee_Left";
/// Header of the attrition percentage column
pub const PERCENTAGE_COLUMN: &str = "Attrition_Percentage";

/// Computation behind a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Attrition over the whole dataset
    OverallAttrition,
    /// Attrition per value of one dimension
    AttritionBy(Dimension, SortOrder),
    /// Mean of a measure per value of one dimension
    AverageBy(Dimension, Measure, SortOrder),
    /// Headcount over a single or composite key
    CountBy(&'static [Dimension], SortOrder),
    /// Most frequent inner value per outer value
    MostCommon(Dimension, Dimension, SortOrder),
    /// Compensation outliers
    Outliers(OutlierVariant),
}

/// A catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSpec {
    /// Stable report name
    pub name: &'static str,
    /// One-line description for `list`
    pub description: &'static str,
    /// What the report computes
    pub kind: ReportKind,
}

const fn attrition(name: &'static str, description: &'static str, dim: Dimension) -> ReportSpec {
    ReportSpec {
        name,
        description,
        kind: ReportKind::AttritionBy(dim, SortOrder::MeasureDescending),
    }
}

const fn average(
    name: &'static str,
    description: &'static str,
    dim: Dimension,
    measure: Measure,
) -> ReportSpec {
    ReportSpec {
        name,
        description,
        kind: ReportKind::AverageBy(dim, measure, SortOrder::KeyAscending),
    }
}

const fn headcount(
    name: &'static str,
    description: &'static str,
    dims: &'static [Dimension],
) -> ReportSpec {
    ReportSpec {
        name,
        description,
        kind: ReportKind::CountBy(dims, SortOrder::KeyAscending),
    }
}

const fn outliers(description: &'static str, variant: OutlierVariant) -> ReportSpec {
    ReportSpec {
        name: variant.name(),
        description,
        kind: ReportKind::Outliers(variant),
    }
}

/// Every report, in the order `run_all` produces them
pub const CATALOGUE: &[ReportSpec] = &[
    ReportSpec {
        name: "overall_attrition",
        description: "Headcount, leavers and attrition percentage for the whole company",
        kind: ReportKind::OverallAttrition,
    },
    attrition(
        "attrition_by_department",
        "Attrition percentage per department",
        Dimension::Department,
    ),
    attrition(
        "attrition_by_gender",
        "Attrition percentage per gender",
        Dimension::Gender,
    ),
    attrition(
        "attrition_by_marital_status",
        "Attrition percentage per marital status",
        Dimension::MaritalStatus,
    ),
    attrition(
        "attrition_by_education_field",
        "Attrition percentage per education field",
        Dimension::EducationField,
    ),
    attrition(
        "attrition_by_job_level",
        "Attrition percentage per job level",
        Dimension::JobLevel,
    ),
    attrition(
        "attrition_by_job_role",
        "Attrition percentage per job role",
        Dimension::JobRole,
    ),
    attrition(
        "attrition_by_overtime",
        "Attrition percentage for employees with and without overtime",
        Dimension::OverTime,
    ),
    attrition(
        "attrition_by_work_life_balance",
        "Attrition percentage per work-life balance rating",
        Dimension::WorkLifeBalance,
    ),
    attrition(
        "attrition_by_performance_rating",
        "Attrition percentage per performance rating",
        Dimension::PerformanceRating,
    ),
    attrition(
        "attrition_by_environment_satisfaction",
        "Attrition percentage per environment satisfaction rating",
        Dimension::EnvironmentSatisfaction,
    ),
    ReportSpec {
        name: "attrition_by_age_band",
        description: "Attrition percentage per age band",
        kind: ReportKind::AttritionBy(Dimension::AgeBand, SortOrder::KeyAscending),
    },
    average(
        "avg_salary_by_department",
        "Average monthly income per department",
        Dimension::Department,
        Measure::MonthlyIncome,
    ),
    average(
        "avg_salary_by_education_field",
        "Average monthly income per education field",
        Dimension::EducationField,
        Measure::MonthlyIncome,
    ),
    average(
        "avg_salary_by_gender",
        "Average monthly income per gender",
        Dimension::Gender,
        Measure::MonthlyIncome,
    ),
    average(
        "avg_salary_by_job_role",
        "Average monthly income per job role",
        Dimension::JobRole,
        Measure::MonthlyIncome,
    ),
    average(
        "avg_tenure_by_department",
        "Average years at the company per department",
        Dimension::Department,
        Measure::YearsAtCompany,
    ),
    average(
        "avg_distance_by_attrition",
        "Average commute distance of leavers and stayers",
        Dimension::Attrition,
        Measure::DistanceFromHome,
    ),
    average(
        "promotion_wait_by_role",
        "Average years since last promotion per job role",
        Dimension::JobRole,
        Measure::YearsSinceLastPromotion,
    ),
    headcount(
        "headcount_by_department",
        "Employees per department",
        &[Dimension::Department],
    ),
    headcount(
        "headcount_by_gender",
        "Employees per gender",
        &[Dimension::Gender],
    ),
    headcount(
        "headcount_by_age_band",
        "Employees per age band",
        &[Dimension::AgeBand],
    ),
    headcount(
        "headcount_by_education_field",
        "Employees per education field",
        &[Dimension::EducationField],
    ),
    headcount(
        "role_count_by_department",
        "Employees per job role within each department",
        &[Dimension::Department, Dimension::JobRole],
    ),
    ReportSpec {
        name: "most_common_role_by_department",
        description: "Most frequent job role in each department",
        kind: ReportKind::MostCommon(
            Dimension::Department,
            Dimension::JobRole,
            SortOrder::KeyAscending,
        ),
    },
    outliers(
        "Top-rated employees paid at or below the mean income who stayed",
        OutlierVariant::UnderpaidHighPerformers,
    ),
    outliers(
        "Employees with 8 or more years paid below the mean income who left",
        OutlierVariant::LongTenureLowPayLeavers,
    ),
    outliers(
        "Employees with under 2 years paid at or above the mean income",
        OutlierVariant::ShortTenureHighPay,
    ),
    outliers(
        "Top-rated employees paid at or below the mean income who left",
        OutlierVariant::UnderpaidHighPerformerLeavers,
    ),
];

fn outlier_columns() -> Vec<Column> {
    vec![
        Column::new("Employee_Number", CellKind::Int),
        Column::new("Department", CellKind::Text),
        Column::new("Job_Role", CellKind::Text),
        Column::new("Performance_Rating", CellKind::Int),
        Column::new("Years_At_Company", CellKind::Int),
        Column::new("Monthly_Income", CellKind::Int),
        Column::new("Attrition", CellKind::Int),
    ]
}

fn outlier_row(record: &EmployeeRecord) -> Vec<Cell> {
    vec![
        Cell::Int(i64::from(record.employee_number)),
        Cell::Text(record.department.clone()),
        Cell::Text(record.job_role.clone()),
        Cell::Int(i64::from(record.performance_rating)),
        Cell::Int(i64::from(record.years_at_company)),
        Cell::Int(i64::from(record.monthly_income)),
        Cell::Int(i64::from(record.attrition.as_flag())),
    ]
}

fn dimension_columns(dims: &[Dimension]) -> impl Iterator<Item = Column> + '_ {
    dims.iter().map(|d| Column::new(d.column_name(), d.cell_kind()))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl ReportSpec {
    /// Output columns, in order
    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        let attrition_measures = [
            Column::new(TOTAL_COLUMN, CellKind::Int),
            Column::new(LEFT_COLUMN, CellKind::Int),
            Column::new(PERCENTAGE_COLUMN, CellKind::Float),
        ];
        match self.kind {
            ReportKind::OverallAttrition => attrition_measures.to_vec(),
            ReportKind::AttritionBy(dim, _) => dimension_columns(&[dim])
                .chain(attrition_measures)
                .collect(),
            ReportKind::AverageBy(dim, measure, _) => dimension_columns(&[dim])
                .chain([
                    Column::new(TOTAL_COLUMN, CellKind::Int),
                    Column::new(measure.average_column_name(), CellKind::Float),
                ])
                .collect(),
            ReportKind::CountBy(dims, _) => dimension_columns(dims)
                .chain([Column::new(TOTAL_COLUMN, CellKind::Int)])
                .collect(),
            ReportKind::MostCommon(outer, inner, _) => dimension_columns(&[outer, inner])
                .chain([Column::new(TOTAL_COLUMN, CellKind::Int)])
                .collect(),
            ReportKind::Outliers(_) => outlier_columns(),
        }
    }

    /// Compute the report over `dataset`
    pub fn run(&self, dataset: &Dataset, config: &AnalyticsConfig) -> Result<ReportTable> {
        let rows = dataset.records();
        let mut table = ReportTable::new(self.name, self.columns());
        table.skipped_records = dataset.skipped_records();

        let group_by =
            |dims: &[Dimension]| GroupBy::new(dims).with_parallel_threshold(config.parallel_threshold);

        match self.kind {
            ReportKind::OverallAttrition => {
                let row = overall_attrition_rate(rows)?;
                table.push_row(vec![
                    Cell::Int(to_i64(row.total)),
                    Cell::Int(to_i64(row.left)),
                    Cell::Float(row.percentage_left),
                ]);
            }
            ReportKind::AttritionBy(dim, order) => {
                for row in group_by(&[dim]).attrition_rate(rows, order)? {
                    let mut cells: Vec<Cell> = row.key.iter().map(|v| v.to_cell()).collect();
                    cells.extend([
                        Cell::Int(to_i64(row.total)),
                        Cell::Int(to_i64(row.left)),
                        Cell::Float(row.percentage_left),
                    ]);
                    table.push_row(cells);
                }
            }
            ReportKind::AverageBy(dim, measure, order) => {
                for row in group_by(&[dim]).average(rows, measure, order)? {
                    let mut cells: Vec<Cell> = row.key.iter().map(|v| v.to_cell()).collect();
                    cells.extend([
                        Cell::Int(to_i64(row.count)),
                        Cell::Float(row.rounded_average()),
                    ]);
                    table.push_row(cells);
                }
            }
            ReportKind::CountBy(dims, order) => {
                for row in group_by(dims).count(rows, order)? {
                    let mut cells: Vec<Cell> = row.key.iter().map(|v| v.to_cell()).collect();
                    cells.push(Cell::Int(to_i64(row.count)));
                    table.push_row(cells);
                }
            }
            ReportKind::MostCommon(outer, inner, order) => {
                // winners are picked per outer key, so counts must arrive grouped by key
                let counts = group_by(&[outer, inner]).count(rows, SortOrder::KeyAscending)?;
                let mut winners = most_common_of(counts);
                if order == SortOrder::MeasureDescending {
                    winners.sort_by(|a, b| b.count.cmp(&a.count));
                }
                for row in winners {
                    let mut cells: Vec<Cell> = row.key.iter().map(|v| v.to_cell()).collect();
                    cells.push(Cell::Int(to_i64(row.count)));
                    table.push_row(cells);
                }
            }
            ReportKind::Outliers(variant) => {
                for record in compensation_outliers(rows, &variant.predicate())? {
                    table.push_row(outlier_row(record));
                }
            }
        }
        Ok(table)
    }
}

/// Look up a catalogue entry by name
pub fn find_report(name: &str) -> Result<&'static ReportSpec> {
    let name = name.trim();
    CATALOGUE
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| AnalyticsError::UnknownReport(name.to_string()))
}

/// Every report name, in catalogue order
pub fn report_names() -> impl Iterator<Item = &'static str> {
    CATALOGUE.iter().map(|spec| spec.name)
}

/// Run one report by name
pub fn run_report(name: &str, dataset: &Dataset, config: &AnalyticsConfig) -> Result<ReportTable> {
    let spec = find_report(name)?;
    let start = Instant::now();
    let table = spec.run(dataset, config)?;
    log::debug!(
        "Report {} produced {} rows in {:?}",
        spec.name,
        table.len(),
        start.elapsed()
    );
    Ok(table)
}

/// Run several reports by name, in the given order
///
/// All names are resolved before any report runs.
pub fn run_reports<S: AsRef<str>>(
    names: &[S],
    dataset: &Dataset,
    config: &AnalyticsConfig,
) -> Result<Vec<ReportTable>> {
    let specs = names
        .iter()
        .map(|name| find_report(name.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    specs.iter().map(|spec| spec.run(dataset, config)).collect()
}

/// Run the whole catalogue in order
pub fn run_all(dataset: &Dataset, config: &AnalyticsConfig) -> Result<Vec<ReportTable>> {
    let start = Instant::now();
    let tables = CATALOGUE
        .iter()
        .map(|spec| spec.run(dataset, config))
        .collect::<Result<Vec<_>>>()?;
    log::info!(
        "Computed {} reports over {} employees in {:?}",
        tables.len(),
        dataset.len(),
        start.elapsed()
    );
    Ok(tables)
}
