//! Home view state: week cards, per-week search and quick enrollment.

use crate::aggregate::attendance::display_name;
use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::ParticipationLevel;
use crate::model::student::Student;
use crate::model::week::{most_recent_week, sort_weeks_for_display, Week};
use crate::search::name_match::{filter_entries_by_search, search_match, NameMatch};
use crate::service::roster_service::RosterSnapshot;
use std::collections::HashMap;

/// Inputs of the "add new student for this week" form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudentForm {
    pub name: String,
    pub participation: ParticipationLevel,
    pub hours_learned: f64,
}

impl Default for NewStudentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            participation: ParticipationLevel::DidNotParticipate,
            hours_learned: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
    Loaded(RosterSnapshot),
    /// Expands the week (collapsing it when already expanded) and selects it.
    ToggleExpand(WeekId),
    SetSearch { week_id: WeekId, query: String },
    /// Toggles a student in the roster selection of the selected week.
    ToggleStudent(StudentId),
    SetNewStudentName(String),
    SetNewStudentLevel(ParticipationLevel),
    SetNewStudentHours(f64),
    /// Clears the form after a successful enrollment.
    NewStudentSaved,
}

/// A roster line as rendered under an expanded week.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeRow<'a> {
    pub student_id: &'a StudentId,
    pub name: &'a str,
    /// Highlight for the current search; `EmptyQuery` when not searching.
    pub highlight: NameMatch,
    pub participation: ParticipationLevel,
    pub hours_learned: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub students: Vec<Student>,
    pub weeks: Vec<Week>,
    pub selected_week: Option<WeekId>,
    pub expanded_week: Option<WeekId>,
    pub search_queries: HashMap<WeekId, String>,
    /// Roster selection for the selected week.
    pub selected_students: Vec<StudentId>,
    pub new_student: NewStudentForm,
}

impl HomeState {
    pub fn apply(&mut self, action: HomeAction) {
        match action {
            HomeAction::Loaded(snapshot) => {
                self.students = snapshot.students;
                self.weeks = snapshot.weeks;
                let still_there = self
                    .selected_week
                    .as_ref()
                    .is_some_and(|id| self.week(id).is_some());
                if !still_there {
                    let latest = most_recent_week(&self.weeks).map(|week| week.id.clone());
                    self.select_week(latest);
                }
                if let Some(id) = self.expanded_week.clone() {
                    if self.week(&id).is_none() {
                        self.expanded_week = None;
                    }
                }
            }
            HomeAction::ToggleExpand(week_id) => {
                if self.expanded_week.as_ref() == Some(&week_id) {
                    self.expanded_week = None;
                } else {
                    self.expanded_week = Some(week_id.clone());
                }
                if self.week(&week_id).is_some() {
                    self.select_week(Some(week_id));
                }
            }
            HomeAction::SetSearch { week_id, query } => {
                self.search_queries.insert(week_id, query);
            }
            HomeAction::ToggleStudent(student_id) => {
                if let Some(index) = self
                    .selected_students
                    .iter()
                    .position(|id| *id == student_id)
                {
                    self.selected_students.remove(index);
                } else {
                    self.selected_students.push(student_id);
                }
            }
            HomeAction::SetNewStudentName(name) => self.new_student.name = name,
            HomeAction::SetNewStudentLevel(level) => self.new_student.participation = level,
            HomeAction::SetNewStudentHours(hours) => self.new_student.hours_learned = hours,
            HomeAction::NewStudentSaved => self.new_student = NewStudentForm::default(),
        }
    }

    /// Weeks, most recent first.
    pub fn weeks_for_display(&self) -> Vec<Week> {
        let mut weeks = self.weeks.clone();
        sort_weeks_for_display(&mut weeks);
        weeks
    }

    pub fn search_query(&self, week_id: &WeekId) -> &str {
        self.search_queries
            .get(week_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Rows of `week_id` visible under its search box, in roster order.
    pub fn visible_rows(&self, week_id: &WeekId) -> Vec<HomeRow<'_>> {
        let Some(week) = self.week(week_id) else {
            return Vec::new();
        };
        let query = self.search_query(week_id);

        filter_entries_by_search(week, &self.students, query)
            .into_iter()
            .map(|entry| {
                let name = display_name(&self.students, &entry.student_id);
                HomeRow {
                    student_id: &entry.student_id,
                    name,
                    highlight: search_match(name, query),
                    participation: entry.participation,
                    hours_learned: entry.hours_or_zero(),
                }
            })
            .collect()
    }

    fn week(&self, id: &WeekId) -> Option<&Week> {
        self.weeks.iter().find(|week| week.id == *id)
    }

    fn select_week(&mut self, week_id: Option<WeekId>) {
        self.selected_students = week_id
            .as_ref()
            .and_then(|id| self.week(id))
            .map(|week| {
                week.students
                    .iter()
                    .map(|entry| entry.student_id.clone())
                    .collect()
            })
            .unwrap_or_default();
        self.selected_week = week_id;
    }
}
