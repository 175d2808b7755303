//! Opaque identifiers for roster records.
//!
//! Ids are generated from random UUIDs, but any non-blank string is accepted
//! so records keyed by another store keep their identity.

use super::validation::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wraps an existing id, rejecting blank values.
            pub fn parse(value: impl Into<String>) -> Result<Self, ModelValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ModelValidationError::EmptyId);
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// True when the id is blank. Only reachable through deserialization.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::parse(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}

opaque_id!(
    /// Stable identifier of a student record.
    StudentId
);

opaque_id!(
    /// Stable identifier of a week record.
    WeekId
);

#[cfg(test)]
mod tests {
    use super::{StudentId, WeekId};
    use crate::model::validation::ModelValidationError;

    #[test]
    fn generated_ids_are_distinct_and_non_blank() {
        let first = StudentId::generate();
        let second = StudentId::generate();
        assert_ne!(first, second);
        assert!(!first.is_blank());
    }

    #[test]
    fn parse_rejects_blank_values() {
        assert_eq!(WeekId::parse("  "), Err(ModelValidationError::EmptyId));
        assert_eq!(
            "abc123".parse::<StudentId>().unwrap().as_str(),
            "abc123"
        );
    }
}
