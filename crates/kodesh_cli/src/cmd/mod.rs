use kodesh_core::{RosterService, SqliteRosterRepository};

pub mod export;
pub mod report;
pub mod student;
pub mod week;

pub type Service<'conn> = RosterService<SqliteRosterRepository<'conn>>;
