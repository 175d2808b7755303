//! Repository layer for roster persistence.
//!
//! # Responsibility
//! - Define the storage contract the service layer depends on.
//! - Isolate SQLite details from use-case orchestration.
//!
//! # Invariants
//! - Repository writes validate model values before persistence.
//! - Missing records surface as semantic `*NotFound` errors.

pub mod roster_repo;
