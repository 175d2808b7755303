//! Student record.

use super::ids::StudentId;
use super::validation::ModelValidationError;
use serde::{Deserialize, Serialize};

/// A tracked student. Names are not unique; lookups by name take the first
/// match in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl Student {
    /// Creates a student with a generated id and a trimmed, non-empty name.
    pub fn new(name: &str) -> Result<Self, ModelValidationError> {
        Self::with_id(StudentId::generate(), name)
    }

    /// Creates a student with a caller-provided id.
    pub fn with_id(id: StudentId, name: &str) -> Result<Self, ModelValidationError> {
        Ok(Self {
            id,
            name: normalize_student_name(name)?,
        })
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_blank() {
            return Err(ModelValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyStudentName);
        }
        Ok(())
    }
}

/// Trims a student name and rejects empty results.
pub fn normalize_student_name(name: &str) -> Result<String, ModelValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelValidationError::EmptyStudentName);
    }
    Ok(trimmed.to_string())
}

/// Returns the first student whose name equals `name` exactly.
pub fn find_student_by_name<'a>(students: &'a [Student], name: &str) -> Option<&'a Student> {
    students.iter().find(|student| student.name == name)
}

/// Returns the student with the given id.
pub fn find_student<'a>(students: &'a [Student], id: &StudentId) -> Option<&'a Student> {
    students.iter().find(|student| student.id == *id)
}
