//! Terminal rendering surface for the roster.
//!
//! [`ConsoleView`] turns view commands into lines of text. Rows are printed
//! as they are rendered rather than redrawn as a table, so the output reads
//! as a log of what the reconciler did.

use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;
use roster_core::{format_average, AlertKind, Field, RosterView, StudentKey, StudentRecord};

/// Message shown when the grade service cannot be reached.
pub const FATAL_ERROR_TEXT: &str =
    "Server Error: the grade service could not be reached. Please try again later.";

/// A [`RosterView`] writing to any `Write` sink.
pub struct ConsoleView<W> {
    out: Mutex<W>,
}

impl ConsoleView<io::Stdout> {
    /// A view printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleView<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the view and returns the sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, args: fmt::Arguments<'_>) {
        let mut out = self.out.lock();
        let _ = out.write_fmt(args).and_then(|()| out.write_all(b"\n"));
        let _ = out.flush();
    }
}

impl ConsoleView<Vec<u8>> {
    /// Everything written so far, for inspection in tests.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out.lock()).into_owned()
    }
}

impl<W: Write + Send> RosterView for ConsoleView<W> {
    fn render_row(&self, key: StudentKey, record: &StudentRecord) {
        self.line(format_args!(
            "{:>6}  {:<24} {:<20} {:>3}",
            key, record.name, record.course, record.grade
        ));
    }

    fn remove_row(&self, key: StudentKey) {
        self.line(format_args!("{key:>6}  (removed)"));
    }

    fn render_average(&self, average: Option<f64>) {
        self.line(format_args!("Grade average: {}", format_average(average)));
    }

    fn show_transient_alert(&self, kind: AlertKind, message: &str) {
        match kind {
            AlertKind::Success => self.line(format_args!("Success! {message}")),
            AlertKind::Failure => self.line(format_args!("Oops! {message}.")),
        }
    }

    fn show_fatal_error_modal(&self) {
        self.line(format_args!("{FATAL_ERROR_TEXT}"));
    }

    fn show_delete_confirmation(&self, key: StudentKey) {
        self.line(format_args!("Delete entry {key}? [y/N]"));
    }

    fn set_field_validation_state(&self, field: Field, errors: &[String]) {
        if errors.is_empty() {
            self.line(format_args!("  {field}: Valid"));
        } else {
            self.line(format_args!("  {field}: {}", errors.join(" ")));
        }
    }

    // There is no persistent form on a terminal, so there is nothing to clear.
    fn clear_field_validation_state(&self, _field: Field) {}

    fn clear_form_inputs(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_average() {
        let view = ConsoleView::new(Vec::new());
        view.render_row(StudentKey(7), &StudentRecord::new("Al", "CS", 95));
        view.render_average(Some(84.5));
        view.render_average(None);

        let out = view.contents();
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].trim_start().starts_with("7  Al"));
        assert!(lines[0].ends_with(" 95"));
        assert_eq!(lines[1], "Grade average: 85");
        assert_eq!(lines[2], "Grade average: N/A");
    }

    #[test]
    fn alerts_are_distinguishable() {
        let view = ConsoleView::new(Vec::new());
        view.show_transient_alert(AlertKind::Success, "Student grade entry has been successfully added.");
        view.show_transient_alert(AlertKind::Failure, "invalid api key, quota exceeded");
        view.show_fatal_error_modal();

        assert_eq!(
            view.contents(),
            format!(
                "Success! Student grade entry has been successfully added.\n\
                 Oops! invalid api key, quota exceeded.\n\
                 {FATAL_ERROR_TEXT}\n"
            )
        );
    }

    #[test]
    fn field_states() {
        let view = ConsoleView::new(Vec::new());
        view.set_field_validation_state(Field::Name, &[]);
        view.set_field_validation_state(
            Field::Grade,
            &["Must be a number.".to_string()],
        );
        view.clear_field_validation_state(Field::Name);
        view.clear_form_inputs();

        assert_eq!(view.into_inner(), b"  name: Valid\n  grade: Must be a number.\n".to_vec());
    }
}
