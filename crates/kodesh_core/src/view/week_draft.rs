//! Draft roster for the add-week and edit-week dialogs.
//!
//! Edits stay local until `commit`, which hands the whole roster to the
//! service in one write. Title and date are only editable while drafting a
//! new week; an edit draft saves the roster alone.

use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::{
    find_participation, merge_participation, new_participation, remove_participation,
    ParticipationLevel, StudentParticipation,
};
use crate::model::student::Student;
use crate::model::validation::ModelValidationError;
use crate::model::week::Week;
use crate::repo::roster_repo::RosterRepository;
use crate::service::roster_service::{RosterService, ServiceResult};

#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    /// Ignored on drafts of an existing week.
    SetTitle(String),
    /// Ignored on drafts of an existing week.
    SetDate(String),
    /// Ignored for students not in the draft.
    SetParticipation {
        student_id: StudentId,
        participation: ParticipationLevel,
    },
    /// Ignored for students not in the draft.
    SetHours {
        student_id: StudentId,
        hours_learned: f64,
    },
    /// Appends the student as `DidNotParticipate`; no-op when present.
    AddStudent(StudentId),
    RemoveStudent(StudentId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekDraft {
    /// `None` while drafting a new week.
    pub week_id: Option<WeekId>,
    pub title: String,
    pub date: String,
    pub entries: Vec<StudentParticipation>,
}

impl WeekDraft {
    /// New-week draft with a defaulted entry for every student.
    pub fn for_new_week(students: &[Student]) -> Result<Self, ModelValidationError> {
        let entries = students
            .iter()
            .map(|student| new_participation(&student.id, ParticipationLevel::default(), None))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            week_id: None,
            title: String::new(),
            date: String::new(),
            entries,
        })
    }

    /// Edit draft seeded from a stored week.
    pub fn for_existing(week: &Week) -> Self {
        Self {
            week_id: Some(week.id.clone()),
            title: week.title.clone(),
            date: week.date.clone(),
            entries: week.students.clone(),
        }
    }

    pub fn apply(&mut self, action: DraftAction) -> Result<(), ModelValidationError> {
        match action {
            DraftAction::SetTitle(title) if self.week_id.is_none() => self.title = title,
            DraftAction::SetDate(date) if self.week_id.is_none() => self.date = date,
            DraftAction::SetTitle(_) | DraftAction::SetDate(_) => {}
            DraftAction::SetParticipation {
                student_id,
                participation,
            } => {
                if let Some(hours) = self.current_hours(&student_id) {
                    self.entries =
                        merge_participation(&self.entries, &student_id, participation, hours)?;
                }
            }
            DraftAction::SetHours {
                student_id,
                hours_learned,
            } => {
                if let Some(participation) = self.current_level(&student_id) {
                    self.entries = merge_participation(
                        &self.entries,
                        &student_id,
                        participation,
                        Some(hours_learned),
                    )?;
                }
            }
            DraftAction::AddStudent(student_id) => {
                if self.current_level(&student_id).is_none() {
                    self.entries = merge_participation(
                        &self.entries,
                        &student_id,
                        ParticipationLevel::DidNotParticipate,
                        None,
                    )?;
                }
            }
            DraftAction::RemoveStudent(student_id) => {
                self.entries = remove_participation(&self.entries, &student_id);
            }
        }
        Ok(())
    }

    /// Students that can still be added to this draft, in list order.
    pub fn available_students<'s>(&self, students: &'s [Student]) -> Vec<&'s Student> {
        students
            .iter()
            .filter(|student| self.current_level(&student.id).is_none())
            .collect()
    }

    /// Persists the draft: replaces the roster of an existing week, or
    /// creates the new week with its title and date. Returns the refreshed
    /// week list.
    pub fn commit<R: RosterRepository>(
        self,
        service: &mut RosterService<R>,
    ) -> ServiceResult<Vec<Week>> {
        match self.week_id {
            Some(week_id) => service.replace_week_participations(&week_id, &self.entries),
            None => service.add_week_with(&self.title, &self.date, self.entries),
        }
    }

    fn current_level(&self, student_id: &StudentId) -> Option<ParticipationLevel> {
        find_participation(&self.entries, student_id).map(|entry| entry.participation)
    }

    fn current_hours(&self, student_id: &StudentId) -> Option<Option<f64>> {
        find_participation(&self.entries, student_id).map(|entry| entry.hours_learned)
    }
}
