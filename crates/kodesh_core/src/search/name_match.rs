//! Case-insensitive name matching with highlight spans.
//!
//! # Invariants
//! - An empty query is a trivial match, distinct from "not found".
//! - Returned spans are byte ranges on `char` boundaries of the searched name.

use crate::model::ids::StudentId;
use crate::model::participation::StudentParticipation;
use crate::model::student::{find_student, Student};
use crate::model::week::Week;

/// Byte range of a match inside the searched name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub len: usize,
}

impl MatchSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Outcome of matching one name against a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// Query was empty; show the name unhighlighted.
    EmptyQuery,
    /// First occurrence of the query.
    Found(MatchSpan),
    /// Query does not occur in the name.
    NotFound,
}

impl NameMatch {
    /// Whether a row with this outcome stays visible under the search.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    pub fn span(&self) -> Option<MatchSpan> {
        match self {
            Self::Found(span) => Some(*span),
            Self::EmptyQuery | Self::NotFound => None,
        }
    }
}

/// Finds the first case-insensitive occurrence of `query` in `name`.
pub fn search_match(name: &str, query: &str) -> NameMatch {
    if query.is_empty() {
        return NameMatch::EmptyQuery;
    }

    let needle = query.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    name.char_indices()
        .find_map(|(start, _)| {
            match_end(name, start, &needle).map(|end| MatchSpan {
                start,
                len: end - start,
            })
        })
        .map_or(NameMatch::NotFound, NameMatch::Found)
}

/// Returns the byte offset where `needle` ends if it matches at `start`.
/// A match must end on a whole source character.
fn match_end(name: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in name[start..].char_indices() {
        if matched == needle.len() {
            return Some(start + offset);
        }
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
    }
    (matched == needle.len()).then_some(name.len())
}

/// Splits `name` around a span into `(before, matched, after)`.
///
/// Falls back to `(name, "", "")` when the span does not fit `name`.
pub fn split_highlight(name: &str, span: MatchSpan) -> (&str, &str, &str) {
    let end = span.end();
    if end > name.len() || !name.is_char_boundary(span.start) || !name.is_char_boundary(end) {
        return (name, "", "");
    }
    (&name[..span.start], &name[span.start..end], &name[end..])
}

/// Students whose name contains `query`, case-insensitively, in input order.
pub fn filter_students_by_name(students: &[Student], query: &str) -> Vec<Student> {
    students
        .iter()
        .filter(|student| search_match(&student.name, query).is_visible())
        .cloned()
        .collect()
}

/// Entries of `week` visible under a per-week search box.
///
/// Every entry is visible for an empty query. Otherwise the entry's student
/// must resolve and match; dangling entries are hidden while searching.
pub fn filter_entries_by_search<'w>(
    week: &'w Week,
    students: &[Student],
    query: &str,
) -> Vec<&'w StudentParticipation> {
    week.students
        .iter()
        .filter(|entry| entry_visible(&entry.student_id, students, query))
        .collect()
}

fn entry_visible(student_id: &StudentId, students: &[Student], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    find_student(students, student_id)
        .map(|student| search_match(&student.name, query).is_visible())
        .unwrap_or(false)
}
