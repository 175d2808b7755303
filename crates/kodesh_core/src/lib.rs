//! Core domain logic for the Kodesh weekly program tracker.
//! This crate is the single source of truth for roster invariants.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod search;
pub mod service;
pub mod view;

pub use aggregate::attendance::{
    display_name, filter_students_attending_all, participation_history, select_weeks,
    HistoryEntry,
};
pub use aggregate::hours::{grand_total_hours, total_hours_for_student, total_hours_for_week};
pub use config::{ConfigError, TrackerConfig, DEFAULT_DB_FILE_NAME};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::ids::{StudentId, WeekId};
pub use model::participation::{
    merge_participation, new_participation, remove_participation, ParticipationLevel,
    StudentParticipation,
};
pub use model::student::Student;
pub use model::validation::ModelValidationError;
pub use model::week::Week;
pub use report::csv::to_csv;
pub use report::history::{format_student_history, StudentHistory};
pub use report::summary::{build_summary, format_summary_table, SummaryFilter, SummaryTable};
pub use report::week_report::{format_week_report, WeekReport};
pub use repo::roster_repo::{RepoError, RepoResult, RosterRepository, SqliteRosterRepository};
pub use search::name_match::{search_match, MatchSpan, NameMatch};
pub use service::roster_service::{RosterService, RosterSnapshot, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
