//! Roster use-case service.
//!
//! # Responsibility
//! - Expose the add/edit/delete actions callers trigger.
//! - Route every roster edit through `merge_participation` /
//!   `remove_participation`.
//! - Return the freshly listed collection after every mutation.
//!
//! # Invariants
//! - Edits run as: fetch week -> compute new roster -> persist -> re-list.
//! - Validation failures are raised before the repository is called.
//! - Overlapping edits to one week are last-write-wins; the whole roster is
//!   replaced on every write.

use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::{
    merge_participation, new_participation, remove_participation, ParticipationLevel,
    StudentParticipation,
};
use crate::model::student::{find_student, find_student_by_name, normalize_student_name, Student};
use crate::model::validation::{validate_hours, ModelValidationError};
use crate::model::week::{sort_weeks_for_display, Week};
use crate::repo::roster_repo::{RepoError, RosterRepository};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for roster use-cases. None of these are fatal; each is
/// scoped to the action that raised it.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before persistence.
    Validation(ModelValidationError),
    WeekNotFound(WeekId),
    StudentNotFound(StudentId),
    /// The week exists but has no entry for the student.
    ParticipationNotFound {
        week_id: WeekId,
        student_id: StudentId,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::WeekNotFound(id) => write!(f, "week not found: {id}"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::ParticipationNotFound {
                week_id,
                student_id,
            } => write!(f, "student {student_id} is not on the roster of week {week_id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::WeekNotFound(id) => Self::WeekNotFound(id),
            RepoError::StudentNotFound(id) => Self::StudentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Both collections, read back together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterSnapshot {
    pub students: Vec<Student>,
    pub weeks: Vec<Week>,
}

/// Result of adding students from free text.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAddOutcome {
    /// Ids of newly created students, in input order.
    pub added: Vec<StudentId>,
    pub students: Vec<Student>,
}

/// Result of adding a student to a week by name.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollOutcome {
    pub student_id: StudentId,
    /// A new student record was created for the name.
    pub created_student: bool,
    /// False when the student was already on the week's roster.
    pub added_to_week: bool,
    pub snapshot: RosterSnapshot,
}

/// Use-case facade over a roster repository.
pub struct RosterService<R: RosterRepository> {
    repo: R,
}

impl<R: RosterRepository> RosterService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.repo.list_students()?)
    }

    /// Weeks in storage order.
    pub fn list_weeks(&self) -> ServiceResult<Vec<Week>> {
        Ok(self.repo.list_weeks()?)
    }

    /// Weeks sorted most recent first.
    pub fn list_weeks_for_display(&self) -> ServiceResult<Vec<Week>> {
        let mut weeks = self.repo.list_weeks()?;
        sort_weeks_for_display(&mut weeks);
        Ok(weeks)
    }

    pub fn snapshot(&self) -> ServiceResult<RosterSnapshot> {
        Ok(RosterSnapshot {
            students: self.repo.list_students()?,
            weeks: self.repo.list_weeks()?,
        })
    }

    pub fn get_week(&self, id: &WeekId) -> ServiceResult<Week> {
        self.repo
            .get_week(id)?
            .ok_or_else(|| ServiceError::WeekNotFound(id.clone()))
    }

    pub fn get_student(&self, id: &StudentId) -> ServiceResult<Student> {
        self.repo
            .get_student(id)?
            .ok_or_else(|| ServiceError::StudentNotFound(id.clone()))
    }

    /// Creates one student and returns the refreshed student list.
    pub fn add_student(&mut self, name: &str) -> ServiceResult<Vec<Student>> {
        let student = Student::new(name)?;
        self.repo.create_student(&student)?;
        info!(
            "event=student_create module=service status=ok student_id={}",
            student.id
        );
        Ok(self.repo.list_students()?)
    }

    /// Adds every comma- or newline-separated name not already known.
    ///
    /// Blank names and names matching an existing student (or an earlier
    /// name in the same input) are skipped.
    pub fn add_students_from_text(&mut self, text: &str) -> ServiceResult<BulkAddOutcome> {
        let existing = self.repo.list_students()?;
        let mut seen = existing
            .iter()
            .map(|student| student.name.clone())
            .collect::<HashSet<_>>();

        let mut added = Vec::new();
        for name in text.split(['\n', ',']).map(str::trim) {
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }
            let student = Student::new(name)?;
            self.repo.create_student(&student)?;
            added.push(student.id);
        }

        info!(
            "event=student_bulk_create module=service status=ok added={}",
            added.len()
        );
        Ok(BulkAddOutcome {
            added,
            students: self.repo.list_students()?,
        })
    }

    pub fn rename_student(&mut self, id: &StudentId, name: &str) -> ServiceResult<Vec<Student>> {
        let name = normalize_student_name(name)?;
        self.repo.rename_student(id, &name)?;
        info!("event=student_rename module=service status=ok student_id={id}");
        Ok(self.repo.list_students()?)
    }

    /// Deletes the student record. Week rosters keep their entries, which
    /// then dangle and display as the raw id.
    pub fn delete_student(&mut self, id: &StudentId) -> ServiceResult<Vec<Student>> {
        self.repo.delete_student(id)?;
        info!("event=student_delete module=service status=ok student_id={id}");
        Ok(self.repo.list_students()?)
    }

    /// Creates a week with a defaulted entry for every known student.
    pub fn add_week(&mut self, title: &str, date: &str) -> ServiceResult<Vec<Week>> {
        let initial = self
            .repo
            .list_students()?
            .iter()
            .map(|student| new_participation(&student.id, ParticipationLevel::default(), None))
            .collect::<Result<Vec<_>, _>>()?;
        self.add_week_with(title, date, initial)
    }

    /// Creates a week with a caller-supplied initial roster.
    pub fn add_week_with(
        &mut self,
        title: &str,
        date: &str,
        initial: Vec<StudentParticipation>,
    ) -> ServiceResult<Vec<Week>> {
        let week = Week::new(title, date, initial)?;
        self.repo.create_week(&week)?;
        info!(
            "event=week_create module=service status=ok week_id={} entries={}",
            week.id,
            week.students.len()
        );
        Ok(self.repo.list_weeks()?)
    }

    pub fn delete_week(&mut self, id: &WeekId) -> ServiceResult<Vec<Week>> {
        self.repo.delete_week(id)?;
        info!("event=week_delete module=service status=ok week_id={id}");
        Ok(self.repo.list_weeks()?)
    }

    /// Replaces a week's roster wholesale (edit dialog save).
    pub fn replace_week_participations(
        &mut self,
        week_id: &WeekId,
        entries: &[StudentParticipation],
    ) -> ServiceResult<Vec<Week>> {
        self.persist_roster(week_id, entries)
    }

    /// Changes the level of an existing entry, keeping its hours.
    pub fn set_participation(
        &mut self,
        week_id: &WeekId,
        student_id: &StudentId,
        participation: ParticipationLevel,
    ) -> ServiceResult<Vec<Week>> {
        self.update_entry(week_id, student_id, Some(participation), None)
    }

    /// Changes the hours of an existing entry, keeping its level.
    pub fn set_hours(
        &mut self,
        week_id: &WeekId,
        student_id: &StudentId,
        hours_learned: f64,
    ) -> ServiceResult<Vec<Week>> {
        self.update_entry(week_id, student_id, None, Some(hours_learned))
    }

    /// Edits the level and/or hours of an existing entry in one write.
    /// Fields passed as `None` keep their stored value; nothing is written
    /// unless both values validate.
    pub fn update_entry(
        &mut self,
        week_id: &WeekId,
        student_id: &StudentId,
        participation: Option<ParticipationLevel>,
        hours_learned: Option<f64>,
    ) -> ServiceResult<Vec<Week>> {
        validate_hours(hours_learned)?;
        let week = self.get_week(week_id)?;
        let current = existing_entry(&week, student_id)?;
        let roster = merge_participation(
            &week.students,
            student_id,
            participation.unwrap_or(current.participation),
            hours_learned.or(current.hours_learned),
        )?;
        self.persist_roster(week_id, &roster)
    }

    /// Adds a known student to a week. A student already on the roster is
    /// left untouched and `Ok(None)` is returned.
    pub fn add_student_to_week(
        &mut self,
        week_id: &WeekId,
        student_id: &StudentId,
        participation: ParticipationLevel,
        hours_learned: Option<f64>,
    ) -> ServiceResult<Option<Vec<Week>>> {
        new_participation(student_id, participation, hours_learned)?;
        let week = self.get_week(week_id)?;
        if self.repo.get_student(student_id)?.is_none() {
            return Err(ServiceError::StudentNotFound(student_id.clone()));
        }
        if week.entry_for(student_id).is_some() {
            return Ok(None);
        }

        let roster = merge_participation(&week.students, student_id, participation, hours_learned)?;
        self.persist_roster(week_id, &roster).map(Some)
    }

    /// Adds a student to a week by name, creating the student first when no
    /// student has that exact name.
    pub fn enroll_by_name(
        &mut self,
        week_id: &WeekId,
        name: &str,
        participation: ParticipationLevel,
        hours_learned: Option<f64>,
    ) -> ServiceResult<EnrollOutcome> {
        let name = normalize_student_name(name)?;
        validate_hours(hours_learned)?;
        let week = self.get_week(week_id)?;

        let students = self.repo.list_students()?;
        let (student_id, created_student) = match find_student_by_name(&students, &name) {
            Some(student) => (student.id.clone(), false),
            None => {
                let student = Student::new(&name)?;
                self.repo.create_student(&student)?;
                info!(
                    "event=student_create module=service status=ok student_id={} source=enroll",
                    student.id
                );
                (student.id, true)
            }
        };

        let added_to_week = week.entry_for(&student_id).is_none();
        if added_to_week {
            let roster =
                merge_participation(&week.students, &student_id, participation, hours_learned)?;
            self.persist_roster(week_id, &roster)?;
        }

        Ok(EnrollOutcome {
            student_id,
            created_student,
            added_to_week,
            snapshot: self.snapshot()?,
        })
    }

    /// Drops a student's entry from a week. Removing an absent entry is a
    /// no-op that still re-lists.
    pub fn remove_student_from_week(
        &mut self,
        week_id: &WeekId,
        student_id: &StudentId,
    ) -> ServiceResult<Vec<Week>> {
        let week = self.get_week(week_id)?;
        let roster = remove_participation(&week.students, student_id);
        self.persist_roster(week_id, &roster)
    }

    /// Sets the roster to exactly the selected students.
    ///
    /// Selected students already on the roster keep their entries and
    /// order; newly selected ones are appended in student-list order as
    /// `InShabbos` with 0 hours; unselected entries are dropped. Selected
    /// ids that match no student are ignored.
    pub fn set_week_roster(
        &mut self,
        week_id: &WeekId,
        selected: &[StudentId],
    ) -> ServiceResult<Vec<Week>> {
        let week = self.get_week(week_id)?;
        let students = self.repo.list_students()?;

        let mut roster = week.students.clone();
        for entry in &week.students {
            if !selected.contains(&entry.student_id) {
                roster = remove_participation(&roster, &entry.student_id);
            }
        }
        for student in &students {
            if selected.contains(&student.id) && week.entry_for(&student.id).is_none() {
                roster = merge_participation(
                    &roster,
                    &student.id,
                    ParticipationLevel::InShabbos,
                    Some(0.0),
                )?;
            }
        }

        let unknown = selected
            .iter()
            .filter(|id| find_student(&students, id).is_none())
            .count();
        if unknown > 0 {
            warn!(
                "event=week_roster_select module=service status=partial week_id={week_id} unknown_students={unknown}"
            );
        }

        self.persist_roster(week_id, &roster)
    }

    fn persist_roster(
        &mut self,
        week_id: &WeekId,
        roster: &[StudentParticipation],
    ) -> ServiceResult<Vec<Week>> {
        self.repo.replace_week_participations(week_id, roster)?;
        info!(
            "event=week_roster_replace module=service status=ok week_id={week_id} entries={}",
            roster.len()
        );
        Ok(self.repo.list_weeks()?)
    }
}

fn existing_entry<'w>(
    week: &'w Week,
    student_id: &StudentId,
) -> ServiceResult<&'w StudentParticipation> {
    week.entry_for(student_id)
        .ok_or_else(|| ServiceError::ParticipationNotFound {
            week_id: week.id.clone(),
            student_id: student_id.clone(),
        })
}
