use hr_attrition::algorithm::{
    Dimension, DimensionValue, GroupBy, Measure, SortOrder, attrition_rate, average_by, count_by,
    mean_of, most_common_by, overall_attrition_rate, promotion_wait_by_role,
};
use hr_attrition::{AgeBand, AnalyticsError, Attrition};

use crate::utils::{employee, synthetic_employees};

#[test]
fn test_group_counts_sum_to_dataset_size() {
    let rows = synthetic_employees(2000, 7);
    for dimension in Dimension::ALL {
        let groups = attrition_rate(&rows, dimension, SortOrder::KeyAscending).unwrap();
        let total: u64 = groups.iter().map(|g| g.total).sum();
        assert_eq!(total, 2000, "{dimension}");
        let left: u64 = groups.iter().map(|g| g.left).sum();
        let overall = overall_attrition_rate(&rows).unwrap();
        assert_eq!(left, overall.left, "{dimension}");
    }
}

#[test]
fn test_overall_all_stayed_and_all_left() {
    let stayed: Vec<_> = (1..=5).map(employee).collect();
    assert_eq!(overall_attrition_rate(&stayed).unwrap().percentage_left, 0.0);

    let left: Vec<_> = (1..=5)
        .map(|n| {
            let mut r = employee(n);
            r.attrition = Attrition::Left;
            r
        })
        .collect();
    let row = overall_attrition_rate(&left).unwrap();
    assert_eq!(row.percentage_left, 100.0);
    assert_eq!((row.total, row.left), (5, 5));
}

#[test]
fn test_overall_percentage_is_rounded() {
    let rows: Vec<_> = (1..=3)
        .map(|n| {
            let mut r = employee(n);
            if n == 1 {
                r.attrition = Attrition::Left;
            }
            r
        })
        .collect();
    assert_eq!(overall_attrition_rate(&rows).unwrap().percentage_left, 33.33);
}

#[test]
fn test_global_aggregates_on_empty_input() {
    assert!(matches!(
        overall_attrition_rate(&[]),
        Err(AnalyticsError::EmptyDataset { .. })
    ));
    assert!(matches!(
        mean_of(&[], Measure::MonthlyIncome),
        Err(AnalyticsError::EmptyDataset { .. })
    ));
    assert!(
        attrition_rate(&[], Dimension::Department, SortOrder::MeasureDescending)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_reports_are_idempotent() {
    let rows = synthetic_employees(500, 11);
    let first = average_by(
        &rows,
        Dimension::JobRole,
        Measure::MonthlyIncome,
        SortOrder::KeyAscending,
    )
    .unwrap();
    let second = average_by(
        &rows,
        Dimension::JobRole,
        Measure::MonthlyIncome,
        SortOrder::KeyAscending,
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_measure_descending_ties_keep_key_order() {
    let rows: Vec<_> = ["Sales", "Human Resources", "Research & Development"]
        .iter()
        .enumerate()
        .map(|(n, department)| {
            let mut r = employee(n as u32 + 1);
            r.department = (*department).to_string();
            r
        })
        .collect();

    let result = attrition_rate(&rows, Dimension::Department, SortOrder::MeasureDescending).unwrap();
    let keys: Vec<String> = result.iter().map(|r| r.key[0].to_string()).collect();
    assert_eq!(
        keys,
        vec!["Human Resources", "Research & Development", "Sales"]
    );
}

#[test]
fn test_age_band_groups_in_band_order() {
    let rows: Vec<_> = [65, 19, 50, 30, 40]
        .iter()
        .enumerate()
        .map(|(n, age)| {
            let mut r = employee(n as u32 + 1);
            r.age = *age;
            r
        })
        .collect();

    let result = count_by(&rows, &[Dimension::AgeBand], SortOrder::KeyAscending).unwrap();
    let bands: Vec<DimensionValue> = result.into_iter().map(|r| r.key[0].clone()).collect();
    assert_eq!(
        bands,
        AgeBand::ALL
            .into_iter()
            .map(DimensionValue::AgeBand)
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_composite_key_counts() {
    let rows = synthetic_employees(300, 3);
    let pairs = count_by(
        &rows,
        &[Dimension::Department, Dimension::JobRole],
        SortOrder::KeyAscending,
    )
    .unwrap();
    assert!(pairs.iter().all(|r| r.key.len() == 2));
    assert_eq!(pairs.iter().map(|r| r.count).sum::<u64>(), 300);

    let top = most_common_by(&rows, Dimension::Department, Dimension::JobRole).unwrap();
    for row in &top {
        let best = pairs
            .iter()
            .filter(|p| p.key[0] == row.key[0])
            .map(|p| p.count)
            .max()
            .unwrap();
        assert_eq!(row.count, best);
    }
}

#[test]
fn test_promotion_wait_by_role() {
    let mut a = employee(1);
    a.job_role = "Manager".to_string();
    a.years_at_company = 10;
    a.years_since_last_promotion = 3;
    let mut b = employee(2);
    b.job_role = "Manager".to_string();
    b.years_at_company = 10;
    b.years_since_last_promotion = 4;
    let c = employee(3);

    let result = promotion_wait_by_role(&[a, b, c]).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].key[0], DimensionValue::Text("Manager".to_string()));
    assert_eq!(result[0].average, 3.5);
    assert_eq!(result[1].average, 1.0);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let rows = synthetic_employees(20_000, 42);
    let dims = [Dimension::EducationField, Dimension::OverTime];

    let sequential = GroupBy::new(&dims)
        .with_parallel_threshold(0)
        .attrition_rate(&rows, SortOrder::MeasureDescending)
        .unwrap();
    let parallel = GroupBy::new(&dims)
        .with_parallel_threshold(1000)
        .attrition_rate(&rows, SortOrder::MeasureDescending)
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_dimension_and_measure_names() {
    assert_eq!("job_role".parse::<Dimension>().unwrap(), Dimension::JobRole);
    assert_eq!("Age Band".parse::<Dimension>().unwrap(), Dimension::AgeBand);
    assert!(matches!(
        "shoe_size".parse::<Dimension>(),
        Err(AnalyticsError::UnknownGroupKey(_))
    ));
    assert_eq!(
        "monthly_income".parse::<Measure>().unwrap(),
        Measure::MonthlyIncome
    );
    assert!(matches!(
        "bonus".parse::<Measure>(),
        Err(AnalyticsError::UnknownMeasure(_))
    ));
}
