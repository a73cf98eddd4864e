//! Contracts between the reconciler and its collaborators.
//!
//! Defines `SyncGateway` (the remote grade store) and `RosterView` (the
//! rendering surface). These are trait-only definitions; the reconciler
//! holds both as `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::error::SyncError;
use crate::types::{AlertKind, Field, StudentKey, StudentRecord};

// ---------------------------------------------------------------------------
// SyncGateway
// ---------------------------------------------------------------------------

/// Create/read/delete access to the remote grade store.
///
/// Every call is a single exchange carrying the shared API credential.
/// Implementations must not retry: each failure is terminal for that call.
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Reads every student the remote store holds.
    async fn fetch_all(&self) -> Result<Vec<(StudentKey, StudentRecord)>, SyncError>;

    /// Creates a student and returns the key the store assigned to it.
    async fn create(&self, record: &StudentRecord) -> Result<StudentKey, SyncError>;

    /// Deletes the student with the given key.
    async fn remove(&self, key: StudentKey) -> Result<(), SyncError>;
}

// ---------------------------------------------------------------------------
// RosterView
// ---------------------------------------------------------------------------

/// Rendering surface driven by the reconciler.
///
/// Methods are commands: the view never calls back into the reconciler and
/// holds no roster state of its own beyond what it has been told to draw.
pub trait RosterView: Send + Sync {
    /// Draws a row for `key`. The reconciler removes any existing row for
    /// the same key first.
    fn render_row(&self, key: StudentKey, record: &StudentRecord);

    /// Removes the row for `key`.
    fn remove_row(&self, key: StudentKey);

    /// Shows the grade average; `None` means no average is available.
    fn render_average(&self, average: Option<f64>);

    /// Shows a dismissible, auto-expiring banner.
    fn show_transient_alert(&self, kind: AlertKind, message: &str);

    /// Shows the blocking indicator for an unreachable grade service.
    fn show_fatal_error_modal(&self);

    /// Asks the user to confirm deleting `key`.
    fn show_delete_confirmation(&self, key: StudentKey);

    /// Marks a form field with its violations; an empty slice marks it valid.
    fn set_field_validation_state(&self, field: Field, errors: &[String]);

    /// Clears any validation marking from a form field.
    fn clear_field_validation_state(&self, field: Field);

    /// Empties the add-student form.
    fn clear_form_inputs(&self);
}
