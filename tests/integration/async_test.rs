use hr_attrition::utils::io::write_records_parquet;
use hr_attrition::{AnalyticsConfig, AnalyticsError, load_dataset, load_dataset_async};
use tempfile::TempDir;

use crate::utils::{csv_rows, synthetic_employees, write_csv, write_empty_parquet};

#[tokio::test]
async fn test_async_parquet_matches_sync() {
    let dir = TempDir::new().unwrap();
    let records = synthetic_employees(500, 17);
    let path = dir.path().join("employees.parquet");
    write_records_parquet(&records, &path).unwrap();

    let config = AnalyticsConfig {
        batch_size: 64,
        ..AnalyticsConfig::default()
    };
    let streamed = load_dataset_async(&path, &config).await.unwrap();
    let loaded = load_dataset(&path, &config).unwrap();

    assert_eq!(streamed.records(), loaded.records());
    assert_eq!(streamed.records(), records.as_slice());
    assert_eq!(streamed.summary().total_rows, 500);
}

#[tokio::test]
async fn test_async_csv_uses_blocking_loader() {
    let dir = TempDir::new().unwrap();
    let records = synthetic_employees(40, 19);
    let path = write_csv(dir.path(), "employees.csv", &csv_rows(&records));

    let data = load_dataset_async(&path, &AnalyticsConfig::default())
        .await
        .unwrap();
    assert_eq!(data.records(), records.as_slice());
}

#[tokio::test]
async fn test_async_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.parquet");
    assert!(
        load_dataset_async(&path, &AnalyticsConfig::default())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_async_empty_parquet_is_schema_checked() {
    let dir = TempDir::new().unwrap();
    let path = write_empty_parquet(dir.path(), "partial.parquet", &["EmployeeNumber"]);
    assert!(matches!(
        load_dataset_async(&path, &AnalyticsConfig::default()).await,
        Err(AnalyticsError::Schema(_))
    ));
}
