use hr_attrition::algorithm::{bucketize_age, bucketize_record, legacy_bucketize_age};
use hr_attrition::{AgeBand, AnalyticsError};

use crate::utils::employee;

#[test]
fn test_boundary_ages() {
    let cases = [
        (18, AgeBand::From18To25),
        (25, AgeBand::From18To25),
        (26, AgeBand::From26To35),
        (45, AgeBand::From36To45),
        (46, AgeBand::From46To60),
        (60, AgeBand::From46To60),
        (61, AgeBand::Over60),
    ];
    for (age, band) in cases {
        assert_eq!(bucketize_age(age).unwrap(), band, "age {age}");
        assert_eq!(legacy_bucketize_age(age), band, "age {age}");
    }
}

#[test]
fn test_labels() {
    let labels: Vec<&str> = AgeBand::ALL.iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["18-25", "26-35", "36-45", "45-60", "60+"]);
}

#[test]
fn test_minor_is_an_invalid_record() {
    let mut record = employee(77);
    record.age = 17;
    match bucketize_record(&record) {
        Err(AnalyticsError::InvalidRecord {
            row,
            employee_number,
            ..
        }) => {
            assert_eq!(row, None);
            assert_eq!(employee_number, Some(77));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
