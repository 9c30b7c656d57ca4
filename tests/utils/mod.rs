use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use hr_attrition::utils::io::write_parquet_batch;
use hr_attrition::{AnalyticsConfig, Attrition, Dataset, EmployeeRecord, RecordBatch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEPARTMENTS: [&str; 3] = ["Human Resources", "Research & Development", "Sales"];

pub const ROLES: [&str; 5] = [
    "Healthcare Representative",
    "Laboratory Technician",
    "Manager",
    "Research Scientist",
    "Sales Executive",
];

pub const EDUCATION_FIELDS: [&str; 4] = ["Life Sciences", "Marketing", "Medical", "Other"];

/// A valid employee with neutral values
#[must_use]
pub fn employee(employee_number: u32) -> EmployeeRecord {
    EmployeeRecord {
        employee_number,
        age: 35,
        attrition: Attrition::Stayed,
        department: "Sales".to_string(),
        job_role: "Sales Executive".to_string(),
        job_level: 2,
        gender: "Male".to_string(),
        marital_status: "Married".to_string(),
        education_field: "Marketing".to_string(),
        overtime: false,
        performance_rating: 3,
        work_life_balance: 3,
        environment_satisfaction: 2,
        monthly_income: 6000,
        years_at_company: 4,
        years_since_last_promotion: 1,
        distance_from_home: 7,
        training_times_last_year: 3,
    }
}

/// A reproducible random dataset of `n` valid employees
#[must_use]
pub fn synthetic_employees(n: u32, seed: u64) -> Vec<EmployeeRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n)
        .map(|employee_number| {
            let years_at_company = rng.random_range(0..30);
            EmployeeRecord {
                employee_number,
                age: rng.random_range(18..66),
                attrition: if rng.random_bool(0.16) {
                    Attrition::Left
                } else {
                    Attrition::Stayed
                },
                department: DEPARTMENTS[rng.random_range(0..DEPARTMENTS.len())].to_string(),
                job_role: ROLES[rng.random_range(0..ROLES.len())].to_string(),
                job_level: rng.random_range(1..=5),
                gender: if rng.random_bool(0.4) { "Female" } else { "Male" }.to_string(),
                marital_status: ["Single", "Married", "Divorced"][rng.random_range(0..3)]
                    .to_string(),
                education_field: EDUCATION_FIELDS[rng.random_range(0..EDUCATION_FIELDS.len())]
                    .to_string(),
                overtime: rng.random_bool(0.3),
                performance_rating: rng.random_range(1..=4),
                work_life_balance: rng.random_range(1..=4),
                environment_satisfaction: rng.random_range(1..=4),
                monthly_income: rng.random_range(1000..20000),
                years_at_company,
                years_since_last_promotion: rng.random_range(0..=years_at_company),
                distance_from_home: rng.random_range(1..30),
                training_times_last_year: rng.random_range(0..7),
            }
        })
        .collect()
}

/// Build a dataset with the default configuration
#[must_use]
pub fn dataset(records: Vec<EmployeeRecord>) -> Dataset {
    Dataset::from_records(records, &AnalyticsConfig::default()).expect("valid test records")
}

/// Header of the classic HR attrition CSV export
pub const CSV_HEADER: &str = "EmployeeNumber,Age,Attrition,Department,JobRole,JobLevel,Gender,\
MaritalStatus,EducationField,OverTime,PerformanceRating,WorkLifeBalance,\
EnvironmentSatisfaction,MonthlyIncome,YearsAtCompany,YearsSinceLastPromotion,\
DistanceFromHome,TrainingTimesLastYear";

/// Render records as CSV rows using `Yes`/`No` flags
#[must_use]
pub fn csv_rows(records: &[EmployeeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
                r.employee_number,
                r.age,
                if r.attrition == Attrition::Left { "Yes" } else { "No" },
                r.department,
                r.job_role,
                r.job_level,
                r.gender,
                r.marital_status,
                r.education_field,
                if r.overtime { "Yes" } else { "No" },
                r.performance_rating,
                r.work_life_balance,
                r.environment_satisfaction,
                r.monthly_income,
                r.years_at_company,
                r.years_since_last_promotion,
                r.distance_from_home,
                r.training_times_last_year
            )
        })
        .collect()
}

/// Write a CSV file with the standard header and the given data lines
pub fn write_csv(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from(CSV_HEADER);
    for line in lines {
        contents.push('\n');
        contents.push_str(line);
    }
    contents.push('\n');
    fs::write(&path, contents).expect("write csv fixture");
    path
}

/// Write a Parquet file with the given integer columns and no rows
pub fn write_empty_parquet(dir: &Path, name: &str, columns: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let fields: Vec<Field> = columns
        .iter()
        .map(|c| Field::new(*c, DataType::Int64, true))
        .collect();
    let batch = RecordBatch::new_empty(Arc::new(Schema::new(fields)));
    write_parquet_batch(&batch, File::create(&path).expect("create parquet fixture"))
        .expect("write parquet fixture");
    path
}
