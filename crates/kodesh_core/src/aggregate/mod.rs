//! Pure aggregation over loaded roster collections.
//!
//! # Responsibility
//! - Hours totals per week and across weeks.
//! - Per-student history and the full-attendance filter.
//!
//! # Invariants
//! - No function here performs I/O or mutates its inputs.
//! - Unrecorded hours count as zero.

pub mod attendance;
pub mod hours;
