//! Participation levels and per-week participation entries.
//!
//! # Responsibility
//! - Define the categorical attendance status and the entry stored per
//!   (student, week) pair.
//! - Provide the merge/remove helpers that every participation edit must use.
//!
//! # Invariants
//! - `merge_participation` leaves exactly one entry for the merged student id.
//! - `remove_participation` is idempotent.
//! - Full attendance is exactly `ParticipationLevel::InShabbos`.

use super::ids::StudentId;
use super::validation::{validate_hours, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Attendance status of one student within one week.
///
/// Serialized with the variant name (`"InShabbos"`), which is also the value
/// written to reports and CSV exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParticipationLevel {
    #[default]
    DidNotParticipate,
    InShabbos,
    OneMealOut,
    OutShabbos,
}

impl ParticipationLevel {
    /// All levels in presentation order.
    pub const ALL: [ParticipationLevel; 4] = [
        Self::DidNotParticipate,
        Self::InShabbos,
        Self::OneMealOut,
        Self::OutShabbos,
    ];

    /// Stable wire/export name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DidNotParticipate => "DidNotParticipate",
            Self::InShabbos => "InShabbos",
            Self::OneMealOut => "OneMealOut",
            Self::OutShabbos => "OutShabbos",
        }
    }

    /// Human-readable label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::DidNotParticipate => "Did not participate",
            Self::InShabbos => "In shabbos",
            Self::OneMealOut => "One meal out",
            Self::OutShabbos => "Out shabbos",
        }
    }

    /// Whether this level counts as full attendance for aggregate filters.
    pub fn is_full_attendance(self) -> bool {
        matches!(self, Self::InShabbos)
    }
}

impl Display for ParticipationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a participation level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParticipationLevelError(pub String);

impl Display for ParseParticipationLevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown participation level `{}`; expected one of DidNotParticipate|InShabbos|OneMealOut|OutShabbos",
            self.0
        )
    }
}

impl Error for ParseParticipationLevelError {}

impl FromStr for ParticipationLevel {
    type Err = ParseParticipationLevelError;

    /// Accepts the wire name case-insensitively, ignoring `_`, `-` and spaces,
    /// so `in-shabbos` and `In shabbos` both resolve.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let squashed = value
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|level| level.as_str().to_ascii_lowercase() == squashed)
            .ok_or_else(|| ParseParticipationLevelError(value.to_string()))
    }
}

/// One student's record within one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentParticipation {
    /// Non-owning reference into the student collection.
    pub student_id: StudentId,
    pub participation: ParticipationLevel,
    /// `None` means not recorded; aggregates treat it as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_learned: Option<f64>,
}

impl StudentParticipation {
    /// Hours learned with the unrecorded case folded to zero.
    pub fn hours_or_zero(&self) -> f64 {
        self.hours_learned.unwrap_or(0.0)
    }

    /// Validates id and hours invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.student_id.is_blank() {
            return Err(ModelValidationError::EmptyId);
        }
        validate_hours(self.hours_learned).map(|_| ())
    }
}

/// Builds a validated participation entry.
///
/// Callers without a preference pass `ParticipationLevel::default()` and
/// `None` hours.
///
/// # Errors
/// - `EmptyId` for a blank student id.
/// - `NegativeHours`/`NonFiniteHours` for invalid hours.
pub fn new_participation(
    student_id: &StudentId,
    participation: ParticipationLevel,
    hours_learned: Option<f64>,
) -> Result<StudentParticipation, ModelValidationError> {
    let entry = StudentParticipation {
        student_id: student_id.clone(),
        participation,
        hours_learned: validate_hours(hours_learned)?,
    };
    entry.validate()?;
    Ok(entry)
}

/// Returns `existing` with the entry for `student_id` replaced in place, or
/// with a new entry appended when the student is not present yet.
///
/// Later duplicates of `student_id`, which only malformed input can carry,
/// are dropped so the result always holds exactly one entry for that id.
pub fn merge_participation(
    existing: &[StudentParticipation],
    student_id: &StudentId,
    participation: ParticipationLevel,
    hours_learned: Option<f64>,
) -> Result<Vec<StudentParticipation>, ModelValidationError> {
    let mut pending = Some(new_participation(
        student_id,
        participation,
        hours_learned,
    )?);
    let mut merged = Vec::with_capacity(existing.len() + 1);

    for entry in existing {
        if entry.student_id == *student_id {
            if let Some(replacement) = pending.take() {
                merged.push(replacement);
            }
            continue;
        }
        merged.push(entry.clone());
    }

    if let Some(appended) = pending {
        merged.push(appended);
    }

    Ok(merged)
}

/// Returns `existing` without any entry for `student_id`.
pub fn remove_participation(
    existing: &[StudentParticipation],
    student_id: &StudentId,
) -> Vec<StudentParticipation> {
    existing
        .iter()
        .filter(|entry| entry.student_id != *student_id)
        .cloned()
        .collect()
}

/// Finds the entry for `student_id`, if any.
pub fn find_participation<'a>(
    entries: &'a [StudentParticipation],
    student_id: &StudentId,
) -> Option<&'a StudentParticipation> {
    entries.iter().find(|entry| entry.student_id == *student_id)
}
