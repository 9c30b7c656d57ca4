//! Grouping dimensions and numeric measures
//!
//! A `Dimension` names a categorical attribute of an employee that reports
//! group by; a `Measure` names a numeric attribute that reports average.
//! Both can be resolved from their stable names.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::algorithm::bucketing::bucketize_record;
use crate::error::{AnalyticsError, Result};
use crate::models::{AgeBand, Cell, CellKind, EmployeeRecord};

/// Categorical attribute used as a group key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Department name
    Department,
    /// Job role title
    JobRole,
    /// Job level (1-5)
    JobLevel,
    /// Gender
    Gender,
    /// Marital status
    MaritalStatus,
    /// Field of education
    EducationField,
    /// Overtime flag
    OverTime,
    /// Attrition flag (1 = left, 0 = stayed)
    Attrition,
    /// Work-life balance rating
    WorkLifeBalance,
    /// Performance rating
    PerformanceRating,
    /// Environment satisfaction rating
    EnvironmentSatisfaction,
    /// Bucketed age
    AgeBand,
}

impl Dimension {
    /// Every dimension, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Department,
        Self::JobRole,
        Self::JobLevel,
        Self::Gender,
        Self::MaritalStatus,
        Self::EducationField,
        Self::OverTime,
        Self::Attrition,
        Self::WorkLifeBalance,
        Self::PerformanceRating,
        Self::EnvironmentSatisfaction,
        Self::AgeBand,
    ];

    /// Stable snake_case name used in report names and on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::JobRole => "job_role",
            Self::JobLevel => "job_level",
            Self::Gender => "gender",
            Self::MaritalStatus => "marital_status",
            Self::EducationField => "education_field",
            Self::OverTime => "overtime",
            Self::Attrition => "attrition",
            Self::WorkLifeBalance => "work_life_balance",
            Self::PerformanceRating => "performance_rating",
            Self::EnvironmentSatisfaction => "environment_satisfaction",
            Self::AgeBand => "age_band",
        }
    }

    /// Output column name for the dimension
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::JobRole => "Job_Role",
            Self::JobLevel => "Job_Level",
            Self::Gender => "Gender",
            Self::MaritalStatus => "Marital_Status",
            Self::EducationField => "Education_Field",
            Self::OverTime => "Over_Time",
            Self::Attrition => "Attrition",
            Self::WorkLifeBalance => "Work_Life_Balance",
            Self::PerformanceRating => "Performance_Rating",
            Self::EnvironmentSatisfaction => "Environment_Satisfaction",
            Self::AgeBand => "Age_Band",
        }
    }

    /// Output column type for the dimension
    #[must_use]
    pub const fn cell_kind(self) -> CellKind {
        match self {
            Self::JobLevel
            | Self::Attrition
            | Self::WorkLifeBalance
            | Self::PerformanceRating
            | Self::EnvironmentSatisfaction => CellKind::Int,
            _ => CellKind::Text,
        }
    }

    /// The record's value for this dimension
    pub fn value(self, record: &EmployeeRecord) -> Result<DimensionValue> {
        Ok(match self {
            Self::Department => DimensionValue::Text(record.department.clone()),
            Self::JobRole => DimensionValue::Text(record.job_role.clone()),
            Self::JobLevel => DimensionValue::Int(i64::from(record.job_level)),
            Self::Gender => DimensionValue::Text(record.gender.clone()),
            Self::MaritalStatus => DimensionValue::Text(record.marital_status.clone()),
            Self::EducationField => DimensionValue::Text(record.education_field.clone()),
            Self::OverTime => {
                DimensionValue::Text(if record.overtime { "Yes" } else { "No" }.to_string())
            }
            Self::Attrition => DimensionValue::Int(i64::from(record.attrition.as_flag())),
            Self::WorkLifeBalance => DimensionValue::Int(i64::from(record.work_life_balance)),
            Self::PerformanceRating => DimensionValue::Int(i64::from(record.performance_rating)),
            Self::EnvironmentSatisfaction => {
                DimensionValue::Int(i64::from(record.environment_satisfaction))
            }
            Self::AgeBand => DimensionValue::AgeBand(bucketize_record(record)?),
        })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|d| d.name() == normalized || d.column_name().to_lowercase() == normalized)
            .ok_or_else(|| AnalyticsError::UnknownGroupKey(s.to_string()))
    }
}

/// One component of a group key
///
/// Ordering is the natural ascending order of the underlying values, which
/// for age bands is band order rather than label order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionValue {
    /// Integer-coded value (levels, ratings, flags)
    Int(i64),
    /// Free-text category
    Text(String),
    /// Age band
    AgeBand(AgeBand),
}

impl DimensionValue {
    /// Convert to an output cell
    #[must_use]
    pub fn to_cell(&self) -> Cell {
        match self {
            Self::Int(v) => Cell::Int(*v),
            Self::Text(s) => Cell::Text(s.clone()),
            Self::AgeBand(band) => Cell::Text(band.label().to_string()),
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::AgeBand(band) => f.write_str(band.label()),
        }
    }
}

/// Composite group key; most reports group by one or two dimensions
pub type GroupKey = SmallVec<[DimensionValue; 2]>;

/// Compute the group key of a record for a list of dimensions
pub fn group_key(dimensions: &[Dimension], record: &EmployeeRecord) -> Result<GroupKey> {
    dimensions.iter().map(|d| d.value(record)).collect()
}

/// Numeric attribute that can be averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Monthly income
    MonthlyIncome,
    /// Years at the company
    YearsAtCompany,
    /// Years since the last promotion
    YearsSinceLastPromotion,
    /// Commute distance
    DistanceFromHome,
    /// Training sessions in the last year
    TrainingTimesLastYear,
    /// Age in years
    Age,
}

impl Measure {
    /// Every measure, in declaration order
    pub const ALL: [Self; 6] = [
        Self::MonthlyIncome,
        Self::YearsAtCompany,
        Self::YearsSinceLastPromotion,
        Self::DistanceFromHome,
        Self::TrainingTimesLastYear,
        Self::Age,
    ];

    /// Stable snake_case name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MonthlyIncome => "monthly_income",
            Self::YearsAtCompany => "years_at_company",
            Self::YearsSinceLastPromotion => "years_since_last_promotion",
            Self::DistanceFromHome => "distance_from_home",
            Self::TrainingTimesLastYear => "training_times_last_year",
            Self::Age => "age",
        }
    }

    /// Output column name for the average of the measure
    #[must_use]
    pub const fn average_column_name(self) -> &'static str {
        match self {
            Self::MonthlyIncome => "Average_Monthly_Income",
            Self::YearsAtCompany => "Average_Years_At_Company",
            Self::YearsSinceLastPromotion => "Average_Years_Since_Last_Promotion",
            Self::DistanceFromHome => "Average_Distance_From_Home",
            Self::TrainingTimesLastYear => "Average_Training_Times_Last_Year",
            Self::Age => "Average_Age",
        }
    }

    /// The record's value for this measure
    #[must_use]
    pub const fn value(self, record: &EmployeeRecord) -> u64 {
        let value = match self {
            Self::MonthlyIncome => record.monthly_income,
            Self::YearsAtCompany => record.years_at_company,
            Self::YearsSinceLastPromotion => record.years_since_last_promotion,
            Self::DistanceFromHome => record.distance_from_home,
            Self::TrainingTimesLastYear => record.training_times_last_year,
            Self::Age => record.age,
        };
        value as u64
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|m| m.name() == normalized)
            .ok_or_else(|| AnalyticsError::UnknownMeasure(s.to_string()))
    }
}
