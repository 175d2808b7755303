//! Week record and display ordering.
//!
//! # Invariants
//! - `date` is a fixed-width `YYYY-MM-DD` string so lexicographic order equals
//!   chronological order.
//! - `students` holds at most one entry per student id.

use super::ids::{StudentId, WeekId};
use super::participation::{find_participation, StudentParticipation};
use super::validation::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const WEEK_DATE_FORMAT: &str = "%Y-%m-%d";

/// One tracked session with its own ordered roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub id: WeekId,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub students: Vec<StudentParticipation>,
}

impl Week {
    /// Creates a week with a generated id.
    pub fn new(
        title: &str,
        date: &str,
        students: Vec<StudentParticipation>,
    ) -> Result<Self, ModelValidationError> {
        let week = Self {
            id: WeekId::generate(),
            title: title.trim().to_string(),
            date: date.trim().to_string(),
            students,
        };
        week.validate()?;
        Ok(week)
    }

    /// Checks title, date and roster invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_blank() {
            return Err(ModelValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::BlankWeekTitle);
        }
        validate_week_date(&self.date)?;
        validate_roster(&self.students)
    }

    /// Returns this week's entry for `student_id`, if recorded.
    pub fn entry_for(&self, student_id: &StudentId) -> Option<&StudentParticipation> {
        find_participation(&self.students, student_id)
    }
}

/// Accepts only fixed-width `YYYY-MM-DD` calendar dates.
pub fn validate_week_date(date: &str) -> Result<(), ModelValidationError> {
    let well_formed = date.len() == 10
        && NaiveDate::parse_from_str(date, WEEK_DATE_FORMAT).is_ok();
    if !well_formed {
        return Err(ModelValidationError::InvalidWeekDate(date.to_string()));
    }
    Ok(())
}

/// Validates every entry and the one-entry-per-student rule.
pub fn validate_roster(entries: &[StudentParticipation]) -> Result<(), ModelValidationError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        entry.validate()?;
        if !seen.insert(&entry.student_id) {
            return Err(ModelValidationError::DuplicateStudent(entry.student_id.clone()));
        }
    }
    Ok(())
}

/// Sorts weeks for display: most recent `date` first. Ties keep input order.
pub fn sort_weeks_for_display(weeks: &mut [Week]) {
    weeks.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Returns the most recent week by `date`, first in input order on ties.
pub fn most_recent_week(weeks: &[Week]) -> Option<&Week> {
    weeks
        .iter()
        .reduce(|best, week| if week.date > best.date { week } else { best })
}
