//! Hours-learned totals.

use crate::model::ids::StudentId;
use crate::model::week::Week;

/// Sum of hours learned across the week's roster; 0 for an empty roster.
pub fn total_hours_for_week(week: &Week) -> f64 {
    week.students
        .iter()
        .map(|entry| entry.hours_or_zero())
        .sum()
}

/// Sum of [`total_hours_for_week`] over every week.
pub fn grand_total_hours(weeks: &[Week]) -> f64 {
    weeks.iter().map(total_hours_for_week).sum()
}

/// Hours learned by one student across `weeks`.
pub fn total_hours_for_student(student_id: &StudentId, weeks: &[Week]) -> f64 {
    weeks
        .iter()
        .filter_map(|week| week.entry_for(student_id))
        .map(|entry| entry.hours_or_zero())
        .sum()
}
