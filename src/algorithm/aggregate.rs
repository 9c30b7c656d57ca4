//! Grouped aggregation
//!
//! Every grouped report is built from the same pass: records are bucketed by
//! a composite key and reduced into a `GroupAccumulator` holding integer
//! counts and sums. Percentages and means are derived from those integers
//! only when a group is finished, so sequential and parallel runs agree
//! exactly.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::algorithm::dimension::{Dimension, GroupKey, Measure, group_key};
use crate::algorithm::parallel::{accumulate_parallel, should_parallelize};
use crate::config::DEFAULT_PARALLEL_THRESHOLD;
use crate::error::{AnalyticsError, Result};
use crate::models::EmployeeRecord;

/// Row order of a grouped result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by group key (band order for age bands)
    KeyAscending,
    /// Descending by the derived measure; ties stay in key order
    MeasureDescending,
}

/// Integer partial aggregates for one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupAccumulator {
    /// Number of records
    pub count: u64,
    /// Number of records with attrition = left
    pub left: u64,
    /// Sum of the averaged measure, if any
    pub sum: u64,
}

impl GroupAccumulator {
    /// Add one record
    pub fn add(&mut self, record: &EmployeeRecord, measure: Option<Measure>) {
        self.count += 1;
        self.left += u64::from(record.has_left());
        if let Some(measure) = measure {
            self.sum += measure.value(record);
        }
    }

    /// Merge another partial aggregate into this one
    pub fn merge(&mut self, other: &Self) {
        self.count += other.count;
        self.left += other.left;
        self.sum += other.sum;
    }

    /// Finish as an attrition row
    pub fn attrition_row(&self, key: GroupKey) -> Result<AttritionRow> {
        if self.count == 0 {
            return Err(AnalyticsError::empty_group(format!(
                "attrition rate for {key:?}"
            )));
        }
        Ok(AttritionRow {
            total: self.count,
            left: self.left,
            percentage_left: rounded_ratio(self.left * 100, self.count),
            key,
        })
    }

    /// Finish as an average row
    pub fn average_row(&self, key: GroupKey) -> Result<AverageRow> {
        if self.count == 0 {
            return Err(AnalyticsError::empty_group(format!("average for {key:?}")));
        }
        #[allow(clippy::cast_precision_loss)]
        let average = self.sum as f64 / self.count as f64;
        Ok(AverageRow {
            count: self.count,
            sum: self.sum,
            average,
            key,
        })
    }
}

/// Attrition breakdown for one group
#[derive(Debug, Clone, PartialEq)]
pub struct AttritionRow {
    /// Group key (empty for the overall rate)
    pub key: GroupKey,
    /// Employees in the group
    pub total: u64,
    /// Employees in the group who left
    pub left: u64,
    /// `100 * left / total`, rounded to 2 decimals
    pub percentage_left: f64,
}

/// Mean of a measure for one group
#[derive(Debug, Clone, PartialEq)]
pub struct AverageRow {
    /// Group key
    pub key: GroupKey,
    /// Employees in the group
    pub count: u64,
    /// Sum of the measure
    pub sum: u64,
    /// Unrounded mean
    pub average: f64,
}

impl AverageRow {
    /// Mean rounded to 2 decimals
    #[must_use]
    pub fn rounded_average(&self) -> f64 {
        rounded_ratio(self.sum, self.count)
    }
}

/// Frequency of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    /// Group key
    pub key: GroupKey,
    /// Employees in the group
    pub count: u64,
}

/// `numerator / denominator` rounded half away from zero to 2 decimals
///
/// Computed in integer arithmetic so that values such as 3.125 round up
/// the way SQL `ROUND` does. `denominator` must be non-zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rounded_ratio(numerator: u64, denominator: u64) -> f64 {
    debug_assert!(denominator > 0);
    let n = u128::from(numerator) * 200 + u128::from(denominator);
    let hundredths = n / (2 * u128::from(denominator));
    hundredths as f64 / 100.0
}

/// A grouping over one or more dimensions
#[derive(Debug, Clone)]
pub struct GroupBy {
    dimensions: SmallVec<[Dimension; 2]>,
    parallel_threshold: usize,
}

impl GroupBy {
    /// Group by the given dimensions, in order
    #[must_use]
    pub fn new(dimensions: &[Dimension]) -> Self {
        Self {
            dimensions: SmallVec::from_slice(dimensions),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Dataset size from which accumulation runs in parallel; 0 disables it
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Accumulate every group, sorted ascending by key
    pub fn accumulate(
        &self,
        rows: &[EmployeeRecord],
        measure: Option<Measure>,
    ) -> Result<Vec<(GroupKey, GroupAccumulator)>> {
        let groups = if should_parallelize(rows.len(), self.parallel_threshold) {
            accumulate_parallel(rows, &self.dimensions, measure)?
        } else {
            accumulate_sequential(rows, &self.dimensions, measure)?
        };

        log::debug!(
            "Grouped {} records into {} groups by {}",
            rows.len(),
            groups.len(),
            self.dimensions.iter().map(|d| d.name()).join(" x ")
        );

        Ok(groups
            .into_iter()
            .sorted_unstable_by(|a, b| a.0.cmp(&b.0))
            .collect())
    }

    /// Attrition count and percentage per group
    pub fn attrition_rate(
        &self,
        rows: &[EmployeeRecord],
        order: SortOrder,
    ) -> Result<Vec<AttritionRow>> {
        let mut result = self
            .accumulate(rows, None)?
            .into_iter()
            .map(|(key, acc)| acc.attrition_row(key))
            .collect::<Result<Vec<_>>>()?;

        if order == SortOrder::MeasureDescending {
            result.sort_by(|a, b| b.percentage_left.total_cmp(&a.percentage_left));
        }
        Ok(result)
    }

    /// Mean of `measure` per group
    pub fn average(
        &self,
        rows: &[EmployeeRecord],
        measure: Measure,
        order: SortOrder,
    ) -> Result<Vec<AverageRow>> {
        let mut result = self
            .accumulate(rows, Some(measure))?
            .into_iter()
            .map(|(key, acc)| acc.average_row(key))
            .collect::<Result<Vec<_>>>()?;

        if order == SortOrder::MeasureDescending {
            result.sort_by(|a, b| b.average.total_cmp(&a.average));
        }
        Ok(result)
    }

    /// Number of records per group
    pub fn count(&self, rows: &[EmployeeRecord], order: SortOrder) -> Result<Vec<CountRow>> {
        let mut result: Vec<CountRow> = self
            .accumulate(rows, None)?
            .into_iter()
            .map(|(key, acc)| CountRow {
                key,
                count: acc.count,
            })
            .collect();

        if order == SortOrder::MeasureDescending {
            result.sort_by(|a, b| b.count.cmp(&a.count));
        }
        Ok(result)
    }
}

/// Single-threaded accumulation into a hash map
pub(crate) fn accumulate_sequential(
    rows: &[EmployeeRecord],
    dimensions: &[Dimension],
    measure: Option<Measure>,
) -> Result<FxHashMap<GroupKey, GroupAccumulator>> {
    let mut groups: FxHashMap<GroupKey, GroupAccumulator> = FxHashMap::default();
    for record in rows {
        let key = group_key(dimensions, record)?;
        groups.entry(key).or_default().add(record, measure);
    }
    Ok(groups)
}

/// Attrition breakdown by one dimension
pub fn attrition_rate(
    rows: &[EmployeeRecord],
    dimension: Dimension,
    order: SortOrder,
) -> Result<Vec<AttritionRow>> {
    GroupBy::new(&[dimension]).attrition_rate(rows, order)
}

/// Attrition over the whole dataset
pub fn overall_attrition_rate(rows: &[EmployeeRecord]) -> Result<AttritionRow> {
    if rows.is_empty() {
        return Err(AnalyticsError::empty_dataset("overall attrition rate"));
    }
    let mut acc = GroupAccumulator::default();
    for record in rows {
        acc.add(record, None);
    }
    acc.attrition_row(GroupKey::new())
}

/// Mean of a measure per value of one dimension
pub fn average_by(
    rows: &[EmployeeRecord],
    dimension: Dimension,
    measure: Measure,
    order: SortOrder,
) -> Result<Vec<AverageRow>> {
    GroupBy::new(&[dimension]).average(rows, measure, order)
}

/// Dataset-wide mean of a measure
pub fn mean_of(rows: &[EmployeeRecord], measure: Measure) -> Result<f64> {
    if rows.is_empty() {
        return Err(AnalyticsError::empty_dataset(format!("mean {}", measure.name())));
    }
    let mut acc = GroupAccumulator::default();
    for record in rows {
        acc.add(record, Some(measure));
    }
    Ok(acc.average_row(GroupKey::new())?.average)
}

/// Frequency counts over a single or composite key
pub fn count_by(
    rows: &[EmployeeRecord],
    dimensions: &[Dimension],
    order: SortOrder,
) -> Result<Vec<CountRow>> {
    GroupBy::new(dimensions).count(rows, order)
}

/// Most frequent `inner` value for each `outer` value
///
/// Rows are keyed `[outer, inner]` and sorted by `outer`. Ties go to the
/// lowest `inner` value.
pub fn most_common_by(
    rows: &[EmployeeRecord],
    outer: Dimension,
    inner: Dimension,
) -> Result<Vec<CountRow>> {
    let counts = count_by(rows, &[outer, inner], SortOrder::KeyAscending)?;
    Ok(most_common_of(counts))
}

/// Reduce key-ascending `[outer, inner]` counts to the top row per `outer` value
#[must_use]
pub fn most_common_of(counts: Vec<CountRow>) -> Vec<CountRow> {
    counts
        .into_iter()
        .chunk_by(|row| row.key[0].clone())
        .into_iter()
        .filter_map(|(_, group)| {
            group.fold(None, |best: Option<CountRow>, row| match best {
                Some(b) if b.count >= row.count => Some(b),
                _ => Some(row),
            })
        })
        .collect()
}

/// Average years since last promotion by job role
pub fn promotion_wait_by_role(rows: &[EmployeeRecord]) -> Result<Vec<AverageRow>> {
    average_by(
        rows,
        Dimension::JobRole,
        Measure::YearsSinceLastPromotion,
        SortOrder::KeyAscending,
    )
}
