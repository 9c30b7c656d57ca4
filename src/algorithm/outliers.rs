//! Compensation outlier detection
//!
//! An outlier query combines a rating or tenure threshold with a comparison
//! against the dataset-wide mean monthly income, optionally restricted to one
//! attrition status. The mean is computed once per query.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::algorithm::aggregate::mean_of;
use crate::algorithm::dimension::Measure;
use crate::error::{AnalyticsError, Result};
use crate::models::employee::TOP_PERFORMANCE_RATING;
use crate::models::{Attrition, EmployeeRecord};

/// Rating or tenure condition of an outlier query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// `performance_rating == n`
    PerformanceRatingEquals(u8),
    /// `years_at_company >= n`
    TenureAtLeast(u32),
    /// `years_at_company < n`
    TenureBelow(u32),
}

impl Threshold {
    fn matches(self, record: &EmployeeRecord) -> bool {
        match self {
            Self::PerformanceRatingEquals(rating) => record.performance_rating == rating,
            Self::TenureAtLeast(years) => record.years_at_company >= years,
            Self::TenureBelow(years) => record.years_at_company < years,
        }
    }
}

/// Comparison of monthly income with the dataset-wide mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeComparison {
    /// `income <= mean`
    AtOrBelowMean,
    /// `income < mean`
    BelowMean,
    /// `income >= mean`
    AtOrAboveMean,
}

impl IncomeComparison {
    fn matches(self, income: u32, mean: f64) -> bool {
        let income = f64::from(income);
        match self {
            Self::AtOrBelowMean => income <= mean,
            Self::BelowMean => income < mean,
            Self::AtOrAboveMean => income >= mean,
        }
    }
}

/// Sort key of an outlier result; ties are broken by employee number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierSort {
    /// Ascending monthly income
    IncomeAscending,
    /// Ascending years at company
    TenureAscending,
}

impl OutlierSort {
    fn compare(self, a: &EmployeeRecord, b: &EmployeeRecord) -> Ordering {
        let primary = match self {
            Self::IncomeAscending => a.monthly_income.cmp(&b.monthly_income),
            Self::TenureAscending => a.years_at_company.cmp(&b.years_at_company),
        };
        primary.then(a.employee_number.cmp(&b.employee_number))
    }
}

/// A complete outlier query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompensationPredicate {
    /// Rating or tenure condition
    pub threshold: Threshold,
    /// Income comparison against the dataset mean
    pub income: IncomeComparison,
    /// Required attrition status, if any
    pub attrition: Option<Attrition>,
    /// Result order
    pub sort: OutlierSort,
}

impl CompensationPredicate {
    /// Whether `record` satisfies the predicate given the dataset mean income
    #[must_use]
    pub fn matches(&self, record: &EmployeeRecord, mean_income: f64) -> bool {
        self.threshold.matches(record)
            && self.income.matches(record.monthly_income, mean_income)
            && self.attrition.is_none_or(|status| record.attrition == status)
    }
}

/// Named outlier queries used by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlierVariant {
    /// Top-rated employees paid at or below the mean who stayed
    UnderpaidHighPerformers,
    /// Employees with 8+ years paid below the mean who left
    LongTenureLowPayLeavers,
    /// Employees with under 2 years paid at or above the mean
    ShortTenureHighPay,
    /// Top-rated employees paid at or below the mean who left
    UnderpaidHighPerformerLeavers,
}

impl OutlierVariant {
    /// Every variant, in catalogue order
    pub const ALL: [Self; 4] = [
        Self::UnderpaidHighPerformers,
        Self::LongTenureLowPayLeavers,
        Self::ShortTenureHighPay,
        Self::UnderpaidHighPerformerLeavers,
    ];

    /// Stable report name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnderpaidHighPerformers => "underpaid_high_performers",
            Self::LongTenureLowPayLeavers => "long_tenure_low_pay_leavers",
            Self::ShortTenureHighPay => "short_tenure_high_pay",
            Self::UnderpaidHighPerformerLeavers => "underpaid_high_performer_leavers",
        }
    }

    /// The query behind the variant
    #[must_use]
    pub const fn predicate(self) -> CompensationPredicate {
        match self {
            Self::UnderpaidHighPerformers => CompensationPredicate {
                threshold: Threshold::PerformanceRatingEquals(TOP_PERFORMANCE_RATING),
                income: IncomeComparison::AtOrBelowMean,
                attrition: Some(Attrition::Stayed),
                sort: OutlierSort::IncomeAscending,
            },
            Self::LongTenureLowPayLeavers => CompensationPredicate {
                threshold: Threshold::TenureAtLeast(8),
                income: IncomeComparison::BelowMean,
                attrition: Some(Attrition::Left),
                sort: OutlierSort::TenureAscending,
            },
            Self::ShortTenureHighPay => CompensationPredicate {
                threshold: Threshold::TenureBelow(2),
                income: IncomeComparison::AtOrAboveMean,
                attrition: None,
                sort: OutlierSort::TenureAscending,
            },
            Self::UnderpaidHighPerformerLeavers => CompensationPredicate {
                threshold: Threshold::PerformanceRatingEquals(TOP_PERFORMANCE_RATING),
                income: IncomeComparison::AtOrBelowMean,
                attrition: Some(Attrition::Left),
                sort: OutlierSort::IncomeAscending,
            },
        }
    }
}

impl fmt::Display for OutlierVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutlierVariant {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s.trim())
            .ok_or_else(|| AnalyticsError::UnknownReport(s.to_string()))
    }
}

/// Records matching `predicate`, sorted by its sort key
///
/// An empty dataset yields no records.
pub fn compensation_outliers<'a>(
    rows: &'a [EmployeeRecord],
    predicate: &CompensationPredicate,
) -> Result<Vec<&'a EmployeeRecord>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let mean_income = mean_of(rows, Measure::MonthlyIncome)?;

    let mut matches: Vec<&EmployeeRecord> = rows
        .iter()
        .filter(|r| predicate.matches(r, mean_income))
        .collect();
    matches.sort_by(|a, b| predicate.sort.compare(a, b));

    log::debug!(
        "{} of {} records match {:?} (mean income {mean_income:.2})",
        matches.len(),
        rows.len(),
        predicate
    );
    Ok(matches)
}
