//! Per-student participation history table.

use super::format_hours;
use super::summary::SUMMARY_ABSENT_CELL;
use super::text::render_table;
use crate::aggregate::attendance::participation_history;
use crate::model::ids::WeekId;
use crate::model::participation::ParticipationLevel;
use crate::model::student::Student;
use crate::model::week::Week;

pub const HISTORY_HEADER: [&str; 4] = ["Week", "Date", "Participation", "Hours Learned"];

#[derive(Debug, Clone, PartialEq)]
pub struct StudentHistoryRow {
    pub week_id: WeekId,
    pub week_title: String,
    pub date: String,
    pub participation: Option<ParticipationLevel>,
    /// `None` when the student is absent or the hours were never recorded.
    pub hours_learned: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentHistory {
    pub student_name: String,
    pub rows: Vec<StudentHistoryRow>,
}

/// One row per week in the given order, absent weeks included.
pub fn format_student_history(student: &Student, weeks: &[Week]) -> StudentHistory {
    let rows = participation_history(student, weeks)
        .into_iter()
        .map(|entry| StudentHistoryRow {
            week_id: entry.week.id.clone(),
            week_title: entry.week.title.clone(),
            date: entry.week.date.clone(),
            participation: entry.participation.map(|p| p.participation),
            hours_learned: entry.participation.and_then(|p| p.hours_learned),
        })
        .collect();

    StudentHistory {
        student_name: student.name.clone(),
        rows,
    }
}

impl StudentHistory {
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.week_title.clone(),
                    row.date.clone(),
                    row.participation
                        .map_or(SUMMARY_ABSENT_CELL, ParticipationLevel::as_str)
                        .to_string(),
                    row.hours_learned
                        .map_or_else(|| SUMMARY_ABSENT_CELL.to_string(), format_hours),
                ]
            })
            .collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("Participation History for {}\n\n", self.student_name);
        if self.rows.is_empty() {
            out.push_str("No participation found for this student.\n");
            return out;
        }
        out.push_str(&render_table(&HISTORY_HEADER, &self.cells()));
        out
    }
}
