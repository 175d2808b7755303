//! Roster repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and load students, weeks and per-week participation rosters.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate model values before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Week rosters are stored and returned in insertion order (`position`).
//! - Deleting a student never touches week rosters.

use crate::db::DbError;
use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::{ParticipationLevel, StudentParticipation};
use crate::model::student::{normalize_student_name, Student};
use crate::model::validation::ModelValidationError;
use crate::model::week::{validate_roster, Week};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT id, name FROM students";
const WEEK_SELECT_SQL: &str = "SELECT id, title, date FROM weeks";
const PARTICIPATION_SELECT_SQL: &str = "SELECT
    week_id,
    student_id,
    participation,
    hours_learned
FROM week_participations";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for roster persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    StudentNotFound(StudentId),
    WeekNotFound(WeekId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::WeekNotFound(id) => write!(f, "week not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "roster database is missing table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the roster. Every list call returns the full,
/// freshly read collection.
pub trait RosterRepository {
    /// Lists students in creation order.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    fn get_student(&self, id: &StudentId) -> RepoResult<Option<Student>>;
    fn create_student(&mut self, student: &Student) -> RepoResult<StudentId>;
    fn rename_student(&mut self, id: &StudentId, name: &str) -> RepoResult<()>;
    /// Deletes the student record only; week rosters keep their entries.
    fn delete_student(&mut self, id: &StudentId) -> RepoResult<()>;

    /// Lists weeks in creation order, each with its ordered roster.
    fn list_weeks(&self) -> RepoResult<Vec<Week>>;
    fn get_week(&self, id: &WeekId) -> RepoResult<Option<Week>>;
    fn create_week(&mut self, week: &Week) -> RepoResult<WeekId>;
    /// Replaces the whole roster of a week in one transaction.
    fn replace_week_participations(
        &mut self,
        id: &WeekId,
        entries: &[StudentParticipation],
    ) -> RepoResult<()>;
    fn delete_week(&mut self, id: &WeekId) -> RepoResult<()>;
}

/// SQLite-backed roster repository.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRosterRepository<'conn> {
    /// Wraps a migrated connection, refusing one without the roster tables.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_roster_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn get_student(&self, id: &StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.as_str()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_student_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_student(&mut self, student: &Student) -> RepoResult<StudentId> {
        student.validate()?;

        self.conn.execute(
            "INSERT INTO students (id, name) VALUES (?1, ?2);",
            params![student.id.as_str(), student.name.as_str()],
        )?;

        Ok(student.id.clone())
    }

    fn rename_student(&mut self, id: &StudentId, name: &str) -> RepoResult<()> {
        let name = normalize_student_name(name)?;

        let changed = self.conn.execute(
            "UPDATE students
             SET
                name = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![name, id.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::StudentNotFound(id.clone()));
        }

        Ok(())
    }

    fn delete_student(&mut self, id: &StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id.as_str()])?;

        if changed == 0 {
            return Err(RepoError::StudentNotFound(id.clone()));
        }

        Ok(())
    }

    fn list_weeks(&self) -> RepoResult<Vec<Week>> {
        let mut rosters = load_all_rosters(self.conn)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{WEEK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut weeks = Vec::new();

        while let Some(row) = rows.next()? {
            let mut week = parse_week_row(row)?;
            week.students = rosters.remove(week.id.as_str()).unwrap_or_default();
            week.validate()?;
            weeks.push(week);
        }

        Ok(weeks)
    }

    fn get_week(&self, id: &WeekId) -> RepoResult<Option<Week>> {
        let week = self
            .conn
            .query_row(
                &format!("{WEEK_SELECT_SQL} WHERE id = ?1;"),
                [id.as_str()],
                |row| Ok(parse_week_row(row)),
            )
            .optional()?;

        let Some(week) = week else {
            return Ok(None);
        };
        let mut week = week?;
        week.students = load_roster(self.conn, id)?;
        week.validate()?;
        Ok(Some(week))
    }

    fn create_week(&mut self, week: &Week) -> RepoResult<WeekId> {
        week.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO weeks (id, title, date) VALUES (?1, ?2, ?3);",
            params![week.id.as_str(), week.title.as_str(), week.date.as_str()],
        )?;
        insert_roster(&tx, &week.id, &week.students)?;
        tx.commit()?;

        Ok(week.id.clone())
    }

    fn replace_week_participations(
        &mut self,
        id: &WeekId,
        entries: &[StudentParticipation],
    ) -> RepoResult<()> {
        validate_roster(entries)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE weeks
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            [id.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::WeekNotFound(id.clone()));
        }

        tx.execute(
            "DELETE FROM week_participations WHERE week_id = ?1;",
            [id.as_str()],
        )?;
        insert_roster(&tx, id, entries)?;
        tx.commit()?;

        Ok(())
    }

    fn delete_week(&mut self, id: &WeekId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM weeks WHERE id = ?1;", [id.as_str()])?;

        if changed == 0 {
            return Err(RepoError::WeekNotFound(id.clone()));
        }

        Ok(())
    }
}

fn insert_roster(
    tx: &Transaction<'_>,
    week_id: &WeekId,
    entries: &[StudentParticipation],
) -> RepoResult<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO week_participations (
            week_id,
            student_id,
            position,
            participation,
            hours_learned
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
    )?;

    for (position, entry) in entries.iter().enumerate() {
        let position = i64::try_from(position).map_err(|_| {
            RepoError::InvalidData(format!("roster position {position} overflows i64"))
        })?;
        stmt.execute(params![
            week_id.as_str(),
            entry.student_id.as_str(),
            position,
            entry.participation.as_str(),
            entry.hours_learned,
        ])?;
    }

    Ok(())
}

fn load_roster(conn: &Connection, week_id: &WeekId) -> RepoResult<Vec<StudentParticipation>> {
    let mut stmt = conn.prepare(&format!(
        "{PARTICIPATION_SELECT_SQL} WHERE week_id = ?1 ORDER BY position ASC;"
    ))?;
    let mut rows = stmt.query([week_id.as_str()])?;
    let mut entries = Vec::new();

    while let Some(row) = rows.next()? {
        entries.push(parse_participation_row(row)?);
    }

    Ok(entries)
}

fn load_all_rosters(conn: &Connection) -> RepoResult<HashMap<String, Vec<StudentParticipation>>> {
    let mut stmt = conn.prepare(&format!(
        "{PARTICIPATION_SELECT_SQL} ORDER BY week_id ASC, position ASC;"
    ))?;
    let mut rows = stmt.query([])?;
    let mut rosters: HashMap<String, Vec<StudentParticipation>> = HashMap::new();

    while let Some(row) = rows.next()? {
        let week_id: String = row.get("week_id")?;
        rosters
            .entry(week_id)
            .or_default()
            .push(parse_participation_row(row)?);
    }

    Ok(rosters)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id_text: String = row.get("id")?;
    let id = StudentId::parse(id_text.as_str()).map_err(|_| {
        RepoError::InvalidData(format!("invalid id `{id_text}` in students.id"))
    })?;
    let student = Student {
        id,
        name: row.get("name")?,
    };
    student.validate()?;
    Ok(student)
}

fn parse_week_row(row: &Row<'_>) -> RepoResult<Week> {
    let id_text: String = row.get("id")?;
    let id = WeekId::parse(id_text.as_str())
        .map_err(|_| RepoError::InvalidData(format!("invalid id `{id_text}` in weeks.id")))?;

    Ok(Week {
        id,
        title: row.get("title")?,
        date: row.get("date")?,
        students: Vec::new(),
    })
}

fn parse_participation_row(row: &Row<'_>) -> RepoResult<StudentParticipation> {
    let student_text: String = row.get("student_id")?;
    let student_id = StudentId::parse(student_text.as_str()).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid student id `{student_text}` in week_participations.student_id"
        ))
    })?;

    let level_text: String = row.get("participation")?;
    let participation = parse_participation_level(&level_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid participation `{level_text}` in week_participations.participation"
        ))
    })?;

    let entry = StudentParticipation {
        student_id,
        participation,
        hours_learned: row.get("hours_learned")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_participation_level(value: &str) -> Option<ParticipationLevel> {
    ParticipationLevel::ALL
        .into_iter()
        .find(|level| level.as_str() == value)
}

fn ensure_roster_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["students", "weeks", "week_participations"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
