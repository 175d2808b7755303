//! Validation errors raised by model constructors.

use super::ids::StudentId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for model values that would break roster invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Student or week id is empty after trim.
    EmptyId,
    /// Student name is empty after trim.
    EmptyStudentName,
    /// Hours learned below zero.
    NegativeHours(f64),
    /// Hours learned is NaN or infinite.
    NonFiniteHours,
    /// Week title is empty after trim.
    BlankWeekTitle,
    /// Week date is not a fixed-width `YYYY-MM-DD` calendar date.
    InvalidWeekDate(String),
    /// A week roster holds two entries for the same student.
    DuplicateStudent(StudentId),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id must not be empty"),
            Self::EmptyStudentName => write!(f, "student name must not be empty"),
            Self::NegativeHours(hours) => {
                write!(f, "hours learned must be >= 0, got {hours}")
            }
            Self::NonFiniteHours => write!(f, "hours learned must be a finite number"),
            Self::BlankWeekTitle => write!(f, "week title must not be blank"),
            Self::InvalidWeekDate(value) => {
                write!(f, "week date `{value}` is not a YYYY-MM-DD date")
            }
            Self::DuplicateStudent(id) => {
                write!(f, "student {id} appears more than once in the week roster")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Checks an optional hours value against the non-negative finite rule and
/// returns it with `-0.0` folded into `0.0`.
pub fn validate_hours(hours: Option<f64>) -> Result<Option<f64>, ModelValidationError> {
    match hours {
        None => Ok(None),
        Some(value) if !value.is_finite() => Err(ModelValidationError::NonFiniteHours),
        Some(value) if value < 0.0 => Err(ModelValidationError::NegativeHours(value)),
        Some(value) if value == 0.0 => Ok(Some(0.0)),
        Some(value) => Ok(Some(value)),
    }
}
