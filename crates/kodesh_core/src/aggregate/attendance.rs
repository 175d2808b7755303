//! Cross-week attendance views.
//!
//! # Invariants
//! - Full attendance is exactly `InShabbos`; any other level or a missing
//!   entry disqualifies a student from the all-weeks filter.
//! - An empty required-week set disables the all-weeks filter.

use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::StudentParticipation;
use crate::model::student::{find_student, Student};
use crate::model::week::Week;

/// One row of a student's participation history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<'w> {
    pub week: &'w Week,
    /// `None` when the student was not recorded for this week.
    pub participation: Option<&'w StudentParticipation>,
}

/// The student's entry for every week, in the order `weeks` is given.
pub fn participation_history<'w>(student: &Student, weeks: &'w [Week]) -> Vec<HistoryEntry<'w>> {
    weeks
        .iter()
        .map(|week| HistoryEntry {
            week,
            participation: week.entry_for(&student.id),
        })
        .collect()
}

/// Weeks whose id is in `selected`, in collection order. An empty selection
/// selects every week.
pub fn select_weeks<'w>(weeks: &'w [Week], selected: &[WeekId]) -> Vec<&'w Week> {
    if selected.is_empty() {
        return weeks.iter().collect();
    }
    weeks
        .iter()
        .filter(|week| selected.contains(&week.id))
        .collect()
}

/// Students with full attendance in every week named by `required`.
///
/// Ids in `required` that match no week in `weeks` cannot be attended, so
/// they exclude every student.
pub fn filter_students_attending_all(
    students: &[Student],
    weeks: &[Week],
    required: &[WeekId],
) -> Vec<Student> {
    if required.is_empty() {
        return students.to_vec();
    }

    let required_weeks = required
        .iter()
        .map(|id| weeks.iter().find(|week| week.id == *id))
        .collect::<Vec<_>>();

    students
        .iter()
        .filter(|student| {
            required_weeks
                .iter()
                .all(|week| week.is_some_and(|week| attended_fully(week, &student.id)))
        })
        .cloned()
        .collect()
}

/// Whether `student_id` has a full-attendance entry in `week`.
pub fn attended_fully(week: &Week, student_id: &StudentId) -> bool {
    week.entry_for(student_id)
        .is_some_and(|entry| entry.participation.is_full_attendance())
}

/// Name to show for a roster entry: the student's name, or the raw id when
/// the reference dangles.
pub fn display_name<'a>(students: &'a [Student], student_id: &'a StudentId) -> &'a str {
    find_student(students, student_id)
        .map(|student| student.name.as_str())
        .unwrap_or_else(|| student_id.as_str())
}
