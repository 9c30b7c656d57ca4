use hr_attrition::algorithm::{
    CompensationPredicate, IncomeComparison, Measure, OutlierSort, OutlierVariant, Threshold,
    compensation_outliers, mean_of,
};
use hr_attrition::{Attrition, EmployeeRecord};

use crate::utils::{employee, synthetic_employees};

#[test]
fn test_underpaid_high_performers_invariants() {
    let rows = synthetic_employees(3000, 5);
    let mean = mean_of(&rows, Measure::MonthlyIncome).unwrap();
    let result =
        compensation_outliers(&rows, &OutlierVariant::UnderpaidHighPerformers.predicate()).unwrap();

    assert!(!result.is_empty());
    for record in &result {
        assert_eq!(record.performance_rating, 4);
        assert_eq!(record.attrition, Attrition::Stayed);
        assert!(f64::from(record.monthly_income) <= mean);
    }
    assert!(
        result
            .windows(2)
            .all(|w| w[0].monthly_income <= w[1].monthly_income)
    );
}

#[test]
fn test_every_variant_matches_its_predicate() {
    let rows = synthetic_employees(3000, 9);
    let mean = mean_of(&rows, Measure::MonthlyIncome).unwrap();
    for variant in OutlierVariant::ALL {
        let predicate = variant.predicate();
        let result = compensation_outliers(&rows, &predicate).unwrap();
        let expected = rows.iter().filter(|r| predicate.matches(r, mean)).count();
        assert_eq!(result.len(), expected, "{variant}");
        assert_eq!(variant.name().parse::<OutlierVariant>().unwrap(), variant);
    }
}

#[test]
fn test_long_tenure_low_pay_leavers_sorted_by_tenure() {
    let make = |n: u32, years: u32, income: u32| -> EmployeeRecord {
        let mut r = employee(n);
        r.attrition = Attrition::Left;
        r.years_at_company = years;
        r.monthly_income = income;
        r
    };
    let rows = vec![
        make(1, 12, 2000),
        make(2, 8, 2500),
        make(3, 8, 2100),
        make(4, 7, 1000),
        make(5, 20, 30_000),
    ];

    let result =
        compensation_outliers(&rows, &OutlierVariant::LongTenureLowPayLeavers.predicate()).unwrap();
    let ids: Vec<u32> = result.iter().map(|r| r.employee_number).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn test_custom_predicate() {
    let mut a = employee(1);
    a.years_at_company = 1;
    a.years_since_last_promotion = 0;
    a.monthly_income = 9000;
    let mut b = employee(2);
    b.years_at_company = 1;
    b.years_since_last_promotion = 0;
    b.monthly_income = 1000;
    let rows = vec![a, b];

    let predicate = CompensationPredicate {
        threshold: Threshold::TenureBelow(2),
        income: IncomeComparison::BelowMean,
        attrition: None,
        sort: OutlierSort::IncomeAscending,
    };
    let result = compensation_outliers(&rows, &predicate).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].employee_number, 2);
}
