//! Cross-week participation summary grid.
//!
//! # Invariants
//! - Columns follow week collection order; rows follow student order.
//! - A student with no entry in a week shows the `-` sentinel.

use super::csv::to_csv;
use super::filename::summary_export_filename_today;
use super::text::render_table;
use crate::aggregate::attendance::{filter_students_attending_all, select_weeks};
use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::ParticipationLevel;
use crate::model::student::Student;
use crate::model::week::Week;
use crate::search::name_match::filter_students_by_name;

pub const SUMMARY_TITLE: &str = "Participation Summary";
pub const SUMMARY_FIRST_COLUMN: &str = "Student";
pub const SUMMARY_ABSENT_CELL: &str = "-";

/// Filters applied before the grid is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    /// Selected weeks; empty means all weeks.
    pub week_ids: Vec<WeekId>,
    /// Case-insensitive name substring; empty keeps everyone.
    pub student_query: String,
    /// Keep only students with full attendance in every selected week.
    pub only_full_attendance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryColumn {
    pub week_id: WeekId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub student_id: StudentId,
    pub name: String,
    /// One cell per column; `None` when the student has no entry that week.
    pub cells: Vec<Option<ParticipationLevel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTable {
    pub columns: Vec<SummaryColumn>,
    pub rows: Vec<SummaryRow>,
}

/// Builds the grid for already-filtered weeks and students.
pub fn format_summary_table(weeks: &[&Week], students: &[Student]) -> SummaryTable {
    let columns = weeks
        .iter()
        .map(|week| SummaryColumn {
            week_id: week.id.clone(),
            title: week.title.clone(),
        })
        .collect();

    let rows = students
        .iter()
        .map(|student| SummaryRow {
            student_id: student.id.clone(),
            name: student.name.clone(),
            cells: weeks
                .iter()
                .map(|week| week.entry_for(&student.id).map(|entry| entry.participation))
                .collect(),
        })
        .collect();

    SummaryTable { columns, rows }
}

/// Applies `filter` and builds the grid.
///
/// Order: week selection, then name filter, then (when enabled and at least
/// one week is selected) the full-attendance filter over the selected weeks.
pub fn build_summary(weeks: &[Week], students: &[Student], filter: &SummaryFilter) -> SummaryTable {
    let selected = select_weeks(weeks, &filter.week_ids);
    let mut visible = filter_students_by_name(students, &filter.student_query);

    if filter.only_full_attendance && !selected.is_empty() {
        let required = selected.iter().map(|week| week.id.clone()).collect::<Vec<_>>();
        visible = filter_students_attending_all(&visible, weeks, &required);
    }

    format_summary_table(&selected, &visible)
}

impl SummaryTable {
    /// `Student` followed by one week title per column.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(SUMMARY_FIRST_COLUMN.to_string())
            .chain(self.columns.iter().map(|column| column.title.clone()))
            .collect()
    }

    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(row.name.clone())
                    .chain(row.cells.iter().map(|cell| {
                        cell.map_or(SUMMARY_ABSENT_CELL, ParticipationLevel::as_str)
                            .to_string()
                    }))
                    .collect()
            })
            .collect()
    }

    pub fn to_csv(&self) -> String {
        to_csv(&self.header(), &self.cells())
    }

    /// Filename stamped with today's local date.
    pub fn export_filename(&self) -> String {
        summary_export_filename_today()
    }

    pub fn render_text(&self, generated_at: &str) -> String {
        let mut out = format!("{SUMMARY_TITLE}\nGenerated: {generated_at}\n\n");
        out.push_str(&render_table(&self.header(), &self.cells()));
        out
    }
}
