//! Domain models for the HR analytics engine
//!
//! This module contains the employee entity loaded from the source table,
//! the shared categorical types, and the report output model.

pub mod employee;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use employee::EmployeeRecord;
pub use report::{Cell, CellKind, Column, ReportRow, ReportTable};
pub use types::{AgeBand, Attrition};
