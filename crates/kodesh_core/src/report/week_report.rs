//! Per-week printable report and CSV export.

use super::csv::to_csv;
use super::filename::week_export_filename;
use super::format_hours;
use super::text::render_table;
use crate::aggregate::attendance::display_name;
use crate::aggregate::hours::total_hours_for_week;
use crate::model::ids::{StudentId, WeekId};
use crate::model::participation::ParticipationLevel;
use crate::model::student::{find_student, Student};
use crate::model::week::Week;

pub const WEEK_REPORT_TITLE: &str = "Kodesh M Tracker - Week Report";
pub const WEEK_REPORT_HEADER: [&str; 3] = ["Student Name", "Participation", "Hours Learned"];

/// One printed line of a week report.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekReportRow {
    pub student_id: StudentId,
    /// Student name, or the raw id when the reference dangles.
    pub name: String,
    pub participation: ParticipationLevel,
    /// Unrecorded hours are reported as 0.
    pub hours_learned: f64,
    pub dangling: bool,
}

/// A week's roster shaped for printing and export.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekReport {
    pub week_id: WeekId,
    pub title: String,
    pub date: String,
    pub rows: Vec<WeekReportRow>,
    /// Footer value, equal to `total_hours_for_week`.
    pub total_hours: f64,
}

/// Builds the report for `week`, rows in roster order.
pub fn format_week_report(week: &Week, students: &[Student]) -> WeekReport {
    let rows = week
        .students
        .iter()
        .map(|entry| WeekReportRow {
            student_id: entry.student_id.clone(),
            name: display_name(students, &entry.student_id).to_string(),
            participation: entry.participation,
            hours_learned: entry.hours_or_zero(),
            dangling: find_student(students, &entry.student_id).is_none(),
        })
        .collect();

    WeekReport {
        week_id: week.id.clone(),
        title: week.title.clone(),
        date: week.date.clone(),
        rows,
        total_hours: total_hours_for_week(week),
    }
}

impl WeekReport {
    /// Row cells as text, in header column order.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.participation.as_str().to_string(),
                    format_hours(row.hours_learned),
                ]
            })
            .collect()
    }

    /// CSV payload: header plus one record per roster entry.
    pub fn to_csv(&self) -> String {
        to_csv(&WEEK_REPORT_HEADER, &self.cells())
    }

    pub fn export_filename(&self) -> String {
        week_export_filename(&self.title, &self.date)
    }

    /// Plain-text page for printing. `generated_at` is stamped verbatim.
    pub fn render_text(&self, generated_at: &str) -> String {
        let mut out = format!(
            "{WEEK_REPORT_TITLE}\nGenerated: {generated_at}\n\n{} ({})\n\n",
            self.title, self.date
        );
        out.push_str(&render_table(&WEEK_REPORT_HEADER, &self.cells()));
        out.push_str(&format!(
            "\nTotal hours learned: {}\n",
            format_hours(self.total_hours)
        ));
        out
    }
}
