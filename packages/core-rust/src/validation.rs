//! Client-side validation of raw form input.
//!
//! Each check takes the untrusted text of one field and returns the ordered
//! list of violations; an empty list means the field is valid. The checks
//! are pure and may be called any number of times.
//!
//! # Grade rule
//!
//! Surrounding whitespace is ignored. Empty input is [`ValidationError::Empty`].
//! Anything other than a run of ASCII digits is [`ValidationError::NotANumber`],
//! so `"50.5"`, `"-5"` and `"1e2"` are all rejected as non-numbers. A digit
//! run above 100, however long, is [`ValidationError::OutOfRange`].

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Field, StudentRecord};

/// Minimum number of characters for name and course.
pub const MIN_TEXT_LEN: usize = 2;

/// Highest accepted grade.
pub const MAX_GRADE: u32 = 100;

static SPECIAL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[~`!#$%^&*+=\-\[\]\\';,/{}|":<>?]"#).expect("special character pattern is valid")
});

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]").expect("digit pattern is valid"));

static GRADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9]+$").expect("grade pattern is valid"));

/// A single rule violation for one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Must be a minimum of 2 letters.")]
    TooShort,
    #[error("{}", invalid_characters_message(*.field))]
    InvalidCharacters { field: Field },
    #[error("Must be a number.")]
    NotANumber,
    #[error("Must be within range: 0-100.")]
    OutOfRange,
    #[error("Must enter a number between 0-100.")]
    Empty,
}

fn invalid_characters_message(field: Field) -> &'static str {
    match field {
        Field::Name => "Must not contain any numbers or special characters.",
        Field::Course | Field::Grade => "Must not contain any special characters.",
    }
}

/// Checks a student name: at least two characters, no digits, no special characters.
#[must_use]
pub fn validate_name(input: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if input.chars().count() < MIN_TEXT_LEN {
        errors.push(ValidationError::TooShort);
    }
    if DIGITS.is_match(input) || SPECIAL_CHARS.is_match(input) {
        errors.push(ValidationError::InvalidCharacters { field: Field::Name });
    }
    errors
}

/// Checks a course name: at least two characters, no special characters.
#[must_use]
pub fn validate_course(input: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if input.chars().count() < MIN_TEXT_LEN {
        errors.push(ValidationError::TooShort);
    }
    if SPECIAL_CHARS.is_match(input) {
        errors.push(ValidationError::InvalidCharacters {
            field: Field::Course,
        });
    }
    errors
}

/// Checks a grade. At most one violation is ever reported.
#[must_use]
pub fn validate_grade(input: &str) -> Vec<ValidationError> {
    match parse_grade(input) {
        Ok(_) => Vec::new(),
        Err(e) => vec![e],
    }
}

/// Parses a grade using the rule described in the module docs.
///
/// # Errors
///
/// Returns the single violation that makes `input` unacceptable.
pub fn parse_grade(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !GRADE.is_match(trimmed) {
        return Err(ValidationError::NotANumber);
    }
    // Digits only, so a parse failure can only be overflow.
    match trimmed.parse::<u32>() {
        Ok(grade) if grade <= MAX_GRADE => Ok(grade),
        _ => Err(ValidationError::OutOfRange),
    }
}

/// Violations for one submission, grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    pub name: Vec<ValidationError>,
    pub course: Vec<ValidationError>,
    pub grade: Vec<ValidationError>,
}

impl ValidationErrorSet {
    /// Returns `true` when no field has a violation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.name.is_empty() && self.course.is_empty() && self.grade.is_empty()
    }

    #[must_use]
    pub fn for_field(&self, field: Field) -> &[ValidationError] {
        match field {
            Field::Name => &self.name,
            Field::Course => &self.course,
            Field::Grade => &self.grade,
        }
    }

    /// Human-readable messages for one field, in rule order.
    #[must_use]
    pub fn messages(&self, field: Field) -> Vec<String> {
        self.for_field(field).iter().map(ToString::to_string).collect()
    }
}

/// Validates a whole add-student form.
///
/// # Errors
///
/// Returns every violation across all three fields when any field is invalid.
pub fn validate_submission(
    name: &str,
    course: &str,
    grade: &str,
) -> Result<StudentRecord, ValidationErrorSet> {
    let errors = ValidationErrorSet {
        name: validate_name(name),
        course: validate_course(course),
        grade: validate_grade(grade),
    };
    match parse_grade(grade) {
        Ok(grade) if errors.is_valid() => Ok(StudentRecord::new(name, course, grade)),
        _ => Err(errors),
    }
}
