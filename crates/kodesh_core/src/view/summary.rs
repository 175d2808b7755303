//! Summary view state.

use crate::model::ids::WeekId;
use crate::model::student::Student;
use crate::model::week::Week;
use crate::report::summary::{build_summary, SummaryFilter, SummaryTable};
use crate::service::roster_service::RosterSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryAction {
    /// Fresh collections after a (re)load.
    Loaded(RosterSnapshot),
    /// Adds or removes one week from the selection.
    ToggleWeek(WeekId),
    SetWeekSelection(Vec<WeekId>),
    SetStudentQuery(String),
    SetOnlyFullAttendance(bool),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryState {
    pub students: Vec<Student>,
    pub weeks: Vec<Week>,
    pub filter: SummaryFilter,
}

impl SummaryState {
    pub fn apply(&mut self, action: SummaryAction) {
        match action {
            SummaryAction::Loaded(snapshot) => {
                self.students = snapshot.students;
                self.weeks = snapshot.weeks;
                let weeks = &self.weeks;
                self.filter
                    .week_ids
                    .retain(|id| weeks.iter().any(|week| week.id == *id));
            }
            SummaryAction::ToggleWeek(id) => {
                if let Some(index) = self.filter.week_ids.iter().position(|w| *w == id) {
                    self.filter.week_ids.remove(index);
                } else {
                    self.filter.week_ids.push(id);
                }
            }
            SummaryAction::SetWeekSelection(ids) => self.filter.week_ids = ids,
            SummaryAction::SetStudentQuery(query) => self.filter.student_query = query,
            SummaryAction::SetOnlyFullAttendance(enabled) => {
                self.filter.only_full_attendance = enabled;
            }
        }
    }

    /// Grid for the current filter.
    pub fn table(&self) -> SummaryTable {
        build_summary(&self.weeks, &self.students, &self.filter)
    }

    /// Number of weeks the full-attendance filter would require.
    pub fn filtered_week_count(&self) -> usize {
        if self.filter.week_ids.is_empty() {
            self.weeks.len()
        } else {
            self.filter.week_ids.len()
        }
    }

    /// Checkbox caption, with the required week count when there is one.
    pub fn full_attendance_label(&self) -> String {
        match self.filtered_week_count() {
            0 => "Show only students who did all weeks".to_string(),
            count => format!("Show only students who did all weeks ({count})"),
        }
    }
}
