//! Roster domain model.
//!
//! # Responsibility
//! - Define students, weeks and per-week participation entries.
//! - Own the invariant-preserving helpers every participation edit goes through.
//!
//! # Invariants
//! - A week holds at most one participation entry per student id.
//! - `StudentParticipation::student_id` is a non-owning reference and may
//!   dangle after the student is deleted.
//! - Hours learned are finite and non-negative; absent hours count as zero.

pub mod ids;
pub mod participation;
pub mod student;
pub mod validation;
pub mod week;
