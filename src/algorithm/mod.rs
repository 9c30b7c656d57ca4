//! Analytics algorithms over employee records
//!
//! This module contains age bucketing, the grouping dimensions and measures,
//! grouped aggregation (sequential and parallel), and compensation outlier
//! detection. Every function here is a pure computation over a slice of
//! records.

pub mod aggregate;
pub mod bucketing;
pub mod dimension;
pub mod outliers;
pub mod parallel;

// Re-export commonly used items
pub use aggregate::{
    AttritionRow, AverageRow, CountRow, GroupAccumulator, GroupBy, SortOrder, attrition_rate,
    average_by, count_by, mean_of, most_common_by, most_common_of, overall_attrition_rate,
    promotion_wait_by_role,
};
pub use bucketing::{bucketize_age, bucketize_record, legacy_bucketize_age};
pub use dimension::{Dimension, DimensionValue, GroupKey, Measure};
pub use outliers::{
    CompensationPredicate, IncomeComparison, OutlierSort, OutlierVariant, Threshold,
    compensation_outliers,
};
