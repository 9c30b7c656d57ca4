use std::fs;

use hr_attrition::utils::io::{OutputFormat, write_table};
use hr_attrition::{AnalyticsConfig, run_report};
use tempfile::TempDir;

use crate::utils::{dataset, synthetic_employees};

#[test]
fn test_write_every_format() {
    let dir = TempDir::new().unwrap();
    let data = dataset(synthetic_employees(200, 23));
    let table = run_report("attrition_by_job_level", &data, &AnalyticsConfig::default()).unwrap();

    for format in [OutputFormat::Json, OutputFormat::Csv, OutputFormat::Parquet] {
        let path = write_table(&table, dir.path(), format).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(format!("attrition_by_job_level.{}", format.extension()).as_str())
        );
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("attrition_by_job_level.json")).unwrap())
            .unwrap();
    assert_eq!(json["report"], "attrition_by_job_level");
    assert_eq!(json["skipped_records"], 0);
    assert_eq!(json["rows"].as_array().unwrap().len(), table.len());

    let csv = fs::read_to_string(dir.path().join("attrition_by_job_level.csv")).unwrap();
    assert_eq!(
        csv.lines().next(),
        Some("Job_Level,Total_Employee,Employee_Left,Attrition_Percentage")
    );
    assert_eq!(csv.lines().count(), table.len() + 1);
}
