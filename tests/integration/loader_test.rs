use hr_attrition::utils::io::write_records_parquet;
use hr_attrition::{AnalyticsConfig, AnalyticsError, Attrition, load_dataset, run_all};
use tempfile::TempDir;

use crate::utils::{
    CSV_HEADER, csv_rows, employee, synthetic_employees, write_csv, write_empty_parquet,
};

#[test]
fn test_csv_and_parquet_load_identically() {
    let dir = TempDir::new().unwrap();
    let records = synthetic_employees(120, 13);

    let csv_path = write_csv(dir.path(), "employees.csv", &csv_rows(&records));
    let parquet_path = dir.path().join("employees.parquet");
    write_records_parquet(&records, &parquet_path).unwrap();

    let config = AnalyticsConfig::default();
    let from_csv = load_dataset(&csv_path, &config).unwrap();
    let from_parquet = load_dataset(&parquet_path, &config).unwrap();

    assert_eq!(from_csv.records(), records.as_slice());
    assert_eq!(from_parquet.records(), records.as_slice());
    assert_eq!(
        run_all(&from_csv, &config).unwrap(),
        run_all(&from_parquet, &config).unwrap()
    );
}

#[test]
fn test_small_batches_keep_row_indices() {
    let dir = TempDir::new().unwrap();
    let mut lines = csv_rows(&(1..=10).map(employee).collect::<Vec<_>>());
    // rating 9 is out of range
    lines[7] = lines[7].replacen(",3,3,2,", ",9,3,2,", 1);
    let path = write_csv(dir.path(), "employees.csv", &lines);

    let config = AnalyticsConfig {
        batch_size: 3,
        ..AnalyticsConfig::default()
    };
    match load_dataset(&path, &config).unwrap_err() {
        AnalyticsError::InvalidRecord {
            row,
            employee_number,
            ..
        } => {
            assert_eq!(row, Some(7));
            assert_eq!(employee_number, Some(8));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_skip_mode_counts_invalid_rows() {
    let dir = TempDir::new().unwrap();
    let mut lines = csv_rows(&(1..=6).map(employee).collect::<Vec<_>>());
    // unparseable attrition flag
    lines[1] = lines[1].replacen(",No,", ",Maybe,", 1);
    // duplicate employee number
    lines.push(lines[0].clone());
    let path = write_csv(dir.path(), "employees.csv", &lines);

    let config = AnalyticsConfig::default().skipping_invalid();
    let data = load_dataset(&path, &config).unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data.skipped_records(), 2);
    assert_eq!(data.summary().total_rows, 7);
    assert!(data.records().iter().all(|r| r.employee_number != 2));

    assert!(load_dataset(&path, &AnalyticsConfig::default()).is_err());
}

#[test]
fn test_attrition_flag_spellings() {
    let dir = TempDir::new().unwrap();
    let mut lines = csv_rows(&(1..=3).map(employee).collect::<Vec<_>>());
    lines[0] = lines[0].replacen(",No,", ",1,", 1);
    lines[1] = lines[1].replacen(",No,", ",Yes,", 1);
    let path = write_csv(dir.path(), "employees.csv", &lines);

    let data = load_dataset(&path, &AnalyticsConfig::default()).unwrap();
    let flags: Vec<Attrition> = data.records().iter().map(|r| r.attrition).collect();
    assert_eq!(flags, vec![Attrition::Left, Attrition::Left, Attrition::Stayed]);
}

#[test]
fn test_missing_column_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    std::fs::write(&path, "EmployeeNumber,Age\n1,30\n").unwrap();

    assert!(matches!(
        load_dataset(&path, &AnalyticsConfig::default()),
        Err(AnalyticsError::Schema(_))
    ));
}

#[test]
fn test_files_without_rows_are_schema_checked() {
    let dir = TempDir::new().unwrap();
    let config = AnalyticsConfig::default();

    let header_only = dir.path().join("header_only.csv");
    std::fs::write(&header_only, "EmployeeNumber,Age\n").unwrap();
    assert!(matches!(
        load_dataset(&header_only, &config),
        Err(AnalyticsError::Schema(_))
    ));

    let empty = dir.path().join("empty.csv");
    std::fs::write(&empty, "").unwrap();
    assert!(matches!(
        load_dataset(&empty, &config),
        Err(AnalyticsError::Schema(_))
    ));

    let parquet = write_empty_parquet(dir.path(), "partial.parquet", &["EmployeeNumber", "Age"]);
    assert!(matches!(
        load_dataset(&parquet, &config),
        Err(AnalyticsError::Schema(_))
    ));

    let full_header = dir.path().join("full_header.csv");
    std::fs::write(&full_header, format!("{CSV_HEADER}\n")).unwrap();
    assert_eq!(load_dataset(&full_header, &config).unwrap().len(), 0);
}

#[test]
fn test_fractional_csv_values_are_invalid_records() {
    let dir = TempDir::new().unwrap();
    let mut lines = csv_rows(&(1..=3).map(employee).collect::<Vec<_>>());
    lines[1] = lines[1].replacen(",6000,", ",6000.9,", 1);
    lines[2] = lines[2].replacen(",6000,", ",6000.0,", 1);
    let path = write_csv(dir.path(), "employees.csv", &lines);

    match load_dataset(&path, &AnalyticsConfig::default()).unwrap_err() {
        AnalyticsError::InvalidRecord {
            row,
            employee_number,
            reason,
        } => {
            assert_eq!(row, Some(1));
            assert_eq!(employee_number, Some(2));
            assert!(reason.contains("MonthlyIncome"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let data = load_dataset(&path, &AnalyticsConfig::default().skipping_invalid()).unwrap();
    let incomes: Vec<(u32, u32)> = data
        .records()
        .iter()
        .map(|r| (r.employee_number, r.monthly_income))
        .collect();
    assert_eq!(incomes, vec![(1, 6000), (3, 6000)]);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("employees.xlsx");
    std::fs::write(&path, "").unwrap();
    assert!(matches!(
        load_dataset(&path, &AnalyticsConfig::default()),
        Err(AnalyticsError::Io(_))
    ));
}
