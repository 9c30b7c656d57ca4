//! Parallel group accumulation
//!
//! Large datasets are split into chunks that are accumulated on the rayon
//! pool and then merged. Partial results are integer counts and sums, so the
//! merge order does not affect the final values.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::algorithm::aggregate::{GroupAccumulator, accumulate_sequential};
use crate::algorithm::dimension::{Dimension, GroupKey, Measure};
use crate::error::Result;
use crate::models::EmployeeRecord;

/// Smallest chunk handed to a single rayon task
const MIN_CHUNK_SIZE: usize = 1024;

/// Whether a dataset of `len` records should be accumulated in parallel
#[must_use]
pub const fn should_parallelize(len: usize, threshold: usize) -> bool {
    threshold > 0 && len >= threshold
}

/// Chunk size giving each CPU a few chunks to balance load
#[must_use]
pub fn chunk_size(len: usize) -> usize {
    let chunks = num_cpus::get().max(1) * 4;
    len.div_ceil(chunks).max(MIN_CHUNK_SIZE)
}

/// Accumulate groups on the rayon pool and merge the partial maps
pub fn accumulate_parallel(
    rows: &[EmployeeRecord],
    dimensions: &[Dimension],
    measure: Option<Measure>,
) -> Result<FxHashMap<GroupKey, GroupAccumulator>> {
    let chunk = chunk_size(rows.len());
    log::debug!(
        "Accumulating {} records in parallel with chunks of {chunk} on {} threads",
        rows.len(),
        rayon::current_num_threads()
    );

    rows.par_chunks(chunk)
        .map(|part| accumulate_sequential(part, dimensions, measure))
        .try_reduce(FxHashMap::default, |mut merged, partial| {
            merge_groups(&mut merged, partial);
            Ok(merged)
        })
}

/// Merge `partial` into `merged`
pub fn merge_groups(
    merged: &mut FxHashMap<GroupKey, GroupAccumulator>,
    partial: FxHashMap<GroupKey, GroupAccumulator>,
) {
    for (key, acc) in partial {
        merged.entry(key).or_default().merge(&acc);
    }
}
