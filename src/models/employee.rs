//! Employee entity model
//!
//! One `EmployeeRecord` per row of the HR table. Records are validated once
//! at load time and are read-only afterwards.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::models::types::Attrition;

/// Valid range for the 1-4 rating scales
pub const RATING_SCALE: RangeInclusive<u8> = 1..=4;

/// Valid range for `job_level`
pub const JOB_LEVEL_SCALE: RangeInclusive<u8> = 1..=5;

/// Highest performance rating
pub const TOP_PERFORMANCE_RATING: u8 = 4;

/// Youngest age accepted in the dataset
pub const MIN_EMPLOYEE_AGE: u32 = 18;

/// A single employee row
///
/// Field names serialize to the column names of the source table so that
/// exported records can be loaded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    /// Unique employee identifier
    pub employee_number: u32,
    /// Age in years
    pub age: u32,
    /// Whether the employee left
    pub attrition: Attrition,
    /// Department name
    pub department: String,
    /// Job role title
    pub job_role: String,
    /// Job level (1-5)
    pub job_level: u8,
    /// Gender as recorded
    pub gender: String,
    /// Marital status as recorded
    pub marital_status: String,
    /// Field of education
    pub education_field: String,
    /// Whether the employee works overtime
    #[serde(rename = "OverTime")]
    pub overtime: bool,
    /// Performance rating (1-4)
    pub performance_rating: u8,
    /// Work-life balance rating (1-4)
    pub work_life_balance: u8,
    /// Environment satisfaction rating (1-4)
    pub environment_satisfaction: u8,
    /// Monthly income in currency units
    pub monthly_income: u32,
    /// Years at the company
    pub years_at_company: u32,
    /// Years since the last promotion
    pub years_since_last_promotion: u32,
    /// Commute distance
    pub distance_from_home: u32,
    /// Training sessions in the last year
    pub training_times_last_year: u32,
}

impl EmployeeRecord {
    /// Check the record-level invariants
    ///
    /// Returns a description of the first violated invariant. Uniqueness of
    /// `employee_number` is a dataset-level property and is checked by the loader.
    pub fn validate(&self) -> Result<(), String> {
        if self.age < MIN_EMPLOYEE_AGE {
            return Err(format!(
                "Age {} is below the minimum of {MIN_EMPLOYEE_AGE}",
                self.age
            ));
        }

        for (name, value) in [
            ("Department", &self.department),
            ("JobRole", &self.job_role),
            ("Gender", &self.gender),
            ("MaritalStatus", &self.marital_status),
            ("EducationField", &self.education_field),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{name} is empty"));
            }
        }

        if !JOB_LEVEL_SCALE.contains(&self.job_level) {
            return Err(format!(
                "JobLevel {} outside {}-{}",
                self.job_level,
                JOB_LEVEL_SCALE.start(),
                JOB_LEVEL_SCALE.end()
            ));
        }

        for (name, value) in [
            ("PerformanceRating", self.performance_rating),
            ("WorkLifeBalance", self.work_life_balance),
            ("EnvironmentSatisfaction", self.environment_satisfaction),
        ] {
            if !RATING_SCALE.contains(&value) {
                return Err(format!(
                    "{name} {value} outside {}-{}",
                    RATING_SCALE.start(),
                    RATING_SCALE.end()
                ));
            }
        }

        if self.years_since_last_promotion > self.years_at_company {
            return Err(format!(
                "YearsSinceLastPromotion {} exceeds YearsAtCompany {}",
                self.years_since_last_promotion, self.years_at_company
            ));
        }

        Ok(())
    }

    /// Whether the employee left the company
    #[must_use]
    pub const fn has_left(&self) -> bool {
        self.attrition.has_left()
    }
}
