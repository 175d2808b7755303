//! Name search used by roster search boxes.
//!
//! # Responsibility
//! - Case-insensitive substring matching over student names.
//! - Report match spans so callers can highlight the hit.

pub mod name_match;
