//! Printable reports and CSV exports.
//!
//! # Responsibility
//! - Shape weeks, summaries and student histories into header + row tables.
//! - Encode tables as CSV and as fixed-width text for printing.
//! - Derive deterministic export filenames.
//!
//! # Invariants
//! - Week report rows follow roster order, never name order.
//! - Dangling student references render as the raw id.
//! - CSV output quotes every field and ends every record with CRLF.

pub mod csv;
pub mod filename;
pub mod history;
pub mod summary;
pub mod text;
pub mod week_report;

/// Formats hours the way they are shown in reports: no trailing `.0`, and
/// never `-0`.
pub fn format_hours(hours: f64) -> String {
    format!("{}", hours + 0.0)
}
