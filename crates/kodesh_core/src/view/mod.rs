//! Per-view state driven by named actions.
//!
//! # Responsibility
//! - Hold each view's state in one struct instead of loose mutable cells.
//! - Apply changes only through `apply(action)`, so every transition can be
//!   tested without a UI.
//!
//! # Invariants
//! - Views never write to storage themselves; they hand drafts to
//!   `RosterService` and reload from the snapshot it returns.

pub mod home;
pub mod summary;
pub mod week_draft;
