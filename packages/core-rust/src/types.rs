//! Domain types shared by every roster component.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote grade store when a student is created.
///
/// Keys are never generated client-side; the only way to obtain one is from
/// a confirmed `create` or a `fetch_all` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentKey(pub i64);

impl StudentKey {
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for StudentKey {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A single student grade entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub course: String,
    /// Grade in `0..=100` once validated. Records received from the remote
    /// store are taken as-is.
    pub grade: u32,
}

impl StudentRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, course: impl Into<String>, grade: u32) -> Self {
        Self {
            name: name.into(),
            course: course.into(),
            grade,
        }
    }
}

/// Form fields that carry their own validation state in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Course,
    Grade,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Course, Field::Grade];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Course => "course",
            Field::Grade => "grade",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Tone of a transient banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Failure,
}

/// Formats an exact average for display, rounding to the nearest integer.
///
/// `None` means the roster is empty and renders as `"N/A"`.
#[must_use]
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(avg) => format!("{}", avg.round()),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_average_rounds_half_up() {
        assert_eq!(format_average(Some(84.5)), "85");
        assert_eq!(format_average(Some(84.49)), "84");
        assert_eq!(format_average(Some(100.0)), "100");
    }

    #[test]
    fn format_average_without_entries() {
        assert_eq!(format_average(None), "N/A");
    }

    #[test]
    fn student_key_is_transparent_on_the_wire() {
        let json = serde_json::to_string(&StudentKey(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn field_names_match_form_groups() {
        let names: Vec<_> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(names, ["name", "course", "grade"]);
    }
}
