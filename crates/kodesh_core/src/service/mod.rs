//! Roster use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the actions callers trigger.
//! - Keep callers decoupled from storage details.

pub mod roster_service;
