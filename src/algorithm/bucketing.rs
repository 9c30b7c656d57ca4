//! Age bucketing
//!
//! Bands use inclusive bounds: 18-25, 26-35, 36-45, 46-60 (labelled "45-60")
//! and 61 or older. Ages below 18 have no band.

use crate::error::{AnalyticsError, Result};
use crate::models::employee::MIN_EMPLOYEE_AGE;
use crate::models::{AgeBand, EmployeeRecord};

/// Classify an age into its band
///
/// Ages below 18 are rejected instead of falling through to `60+`.
pub fn bucketize_age(age: u32) -> Result<AgeBand> {
    match age {
        a if a < MIN_EMPLOYEE_AGE => Err(AnalyticsError::invalid_value(
            None,
            format!("Age {a} is below the youngest age band"),
        )),
        _ => Ok(legacy_bucketize_age(age)),
    }
}

/// Classify a record's age into its band
///
/// Errors carry the record's employee number but no row index, since the
/// record is no longer tied to its input position.
pub fn bucketize_record(record: &EmployeeRecord) -> Result<AgeBand> {
    bucketize_age(record.age).map_err(|_| {
        AnalyticsError::invalid_value(
            Some(record.employee_number),
            format!("Age {} is below the youngest age band", record.age),
        )
    })
}

/// Band assignment that sends every unmatched age, including under-18s, to `60+`
///
/// Kept for parity with dashboards built on the original band rules.
#[must_use]
pub const fn legacy_bucketize_age(age: u32) -> AgeBand {
    match age {
        18..=25 => AgeBand::From18To25,
        26..=35 => AgeBand::From26To35,
        36..=45 => AgeBand::From36To45,
        46..=60 => AgeBand::From46To60,
        _ => AgeBand::Over60,
    }
}
