//! PEP audit core
//!
//! This module contains the reconciliation pipeline:
//! - The expected-status table and status extraction
//! - Per-row processing with a tagged outcome
//! - The engine that drives all rows and aggregates the result

mod reconcile;
mod row;
mod status;

pub use reconcile::{audit_peps, reconcile, Discrepancy, RunResult, StatusHistogram};
pub use row::{process_row, IndexRow, RowOutcome};
pub use status::{expected_statuses, extract_status};
