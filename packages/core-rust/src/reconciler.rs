//! Orchestration of validation, remote sync, roster updates, and view commands.
//!
//! Each user action runs one flow:
//!
//! - **add**: validate → create remotely → insert into roster → render row
//! - **load**: fetch remotely → merge every record into roster → render rows
//! - **delete**: request confirmation → delete remotely → remove from roster
//!   and view
//!
//! The roster is only mutated after the gateway confirms the remote change,
//! so a failed exchange leaves it exactly as it was. Every flow ends by
//! rendering the average computed from the roster's current contents.
//!
//! Flows take `&self` so that exchanges for different keys can be in flight
//! at the same time. Exchanges touching the same key are serialized with
//! RAII pending guards: a second request resolves to [`FlowOutcome::Busy`]
//! without reaching the gateway.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{SyncError, TransportError};
use crate::roster::Roster;
use crate::traits::{RosterView, SyncGateway};
use crate::types::{AlertKind, Field, StudentKey, StudentRecord};
use crate::validation::{validate_submission, ValidationErrorSet};

/// Upper bound on a single gateway exchange unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ADD_SUCCESS_MESSAGE: &str = "Student grade entry has been successfully added.";
pub const LOAD_SUCCESS_MESSAGE: &str =
    "Student grade entries have been successfully loaded from the server.";
pub const DELETE_SUCCESS_MESSAGE: &str = "Student grade entry has been successfully deleted.";
pub const ADD_BUSY_MESSAGE: &str = "A submission is already in progress.";
pub const DELETE_BUSY_MESSAGE: &str = "This entry is already being deleted.";

// ---------------------------------------------------------------------------
// Flow inputs and outcomes
// ---------------------------------------------------------------------------

/// Raw, untrusted text of the add-student form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub course: String,
    pub grade: String,
}

impl StudentForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        course: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            course: course.into(),
            grade: grade.into(),
        }
    }
}

/// How a flow terminated. Flows never return errors; every failure has
/// already been shown to the user by the time this is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// A student was created remotely and added under this key.
    Added(StudentKey),
    /// This many records were fetched and merged into the roster.
    Loaded(usize),
    /// The student with this key was deleted remotely and locally.
    Deleted(StudentKey),
    /// Input failed validation; no exchange was issued.
    Invalid(ValidationErrorSet),
    /// The server rejected the request; the joined message was shown.
    Rejected(String),
    /// The server could not be reached; the fatal modal was shown.
    Unreachable(TransportError),
    /// The same action is already in flight; no exchange was issued.
    Busy,
    /// A pending confirmation was dismissed.
    Cancelled,
}

/// A delete awaiting the user's confirmation.
///
/// The key is captured when the confirmation is requested and is exactly
/// the key that will be removed once confirmed.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a delete only happens once the confirmation is confirmed"]
pub struct DeleteConfirmation {
    key: StudentKey,
}

impl DeleteConfirmation {
    #[must_use]
    pub fn key(&self) -> StudentKey {
        self.key
    }
}

// ---------------------------------------------------------------------------
// Pending tracking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Add,
    Load,
    Delete(StudentKey),
}

#[derive(Debug, Default)]
struct Pending {
    adding: bool,
    loads: usize,
    deleting: HashSet<StudentKey>,
    /// Keys deleted while at least one load was in flight. A fetch answered
    /// before such a delete may still list the key.
    deleted_during_load: HashSet<StudentKey>,
}

impl Pending {
    /// Keys a completing load must not merge.
    fn stale_keys(&self) -> HashSet<StudentKey> {
        self.deleting
            .union(&self.deleted_during_load)
            .copied()
            .collect()
    }

    fn record_delete(&mut self, key: StudentKey) {
        if self.loads > 0 {
            self.deleted_during_load.insert(key);
        }
    }
}

/// Marks a slot as in flight until dropped, on every exit path.
struct PendingGuard<'a> {
    pending: &'a Mutex<Pending>,
    slot: Slot,
}

impl<'a> PendingGuard<'a> {
    fn acquire(pending: &'a Mutex<Pending>, slot: Slot) -> Option<Self> {
        let mut state = pending.lock();
        let acquired = match slot {
            Slot::Add => !std::mem::replace(&mut state.adding, true),
            Slot::Load => {
                state.loads += 1;
                true
            }
            Slot::Delete(key) => state.deleting.insert(key),
        };
        if !acquired {
            return None;
        }
        drop(state);
        Some(Self { pending, slot })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.pending.lock();
        match self.slot {
            Slot::Add => state.adding = false,
            Slot::Load => {
                state.loads -= 1;
                if state.loads == 0 {
                    state.deleted_during_load.clear();
                }
            }
            Slot::Delete(key) => {
                state.deleting.remove(&key);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Keeps the roster, the remote store, and the view consistent.
pub struct Reconciler {
    gateway: Arc<dyn SyncGateway>,
    view: Arc<dyn RosterView>,
    roster: Mutex<Roster>,
    pending: Mutex<Pending>,
    request_timeout: Duration,
}

impl Reconciler {
    /// Creates a reconciler with an empty roster.
    #[must_use]
    pub fn new(gateway: Arc<dyn SyncGateway>, view: Arc<dyn RosterView>) -> Self {
        Self {
            gateway,
            view,
            roster: Mutex::new(Roster::new()),
            pending: Mutex::new(Pending::default()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bounds every gateway exchange by `timeout`.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns a copy of the current roster.
    #[must_use]
    pub fn roster(&self) -> Roster {
        self.roster.lock().clone()
    }

    /// Exact average of the current roster.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        self.roster.lock().average()
    }

    /// Page-load behaviour: empty the form, then load from the server.
    pub async fn initialize(&self) -> FlowOutcome {
        self.view.clear_form_inputs();
        self.load().await
    }

    /// Empties the form and drops any field validation marking.
    pub fn cancel_form(&self) {
        self.view.clear_form_inputs();
        self.clear_validation();
    }

    /// Add flow.
    ///
    /// Validation always runs before any exchange; invalid input never
    /// reaches the gateway. While a submission is in flight further
    /// submissions resolve to [`FlowOutcome::Busy`].
    pub async fn add(&self, form: &StudentForm) -> FlowOutcome {
        let Some(_guard) = PendingGuard::acquire(&self.pending, Slot::Add) else {
            debug!("add ignored, submission in flight");
            self.view.show_transient_alert(AlertKind::Failure, ADD_BUSY_MESSAGE);
            return self.finish(FlowOutcome::Busy);
        };

        let record = match validate_submission(&form.name, &form.course, &form.grade) {
            Ok(record) => record,
            Err(errors) => {
                debug!(?errors, "add rejected by validation");
                for field in Field::ALL {
                    self.view
                        .set_field_validation_state(field, &errors.messages(field));
                }
                return self.finish(FlowOutcome::Invalid(errors));
            }
        };

        self.view.clear_form_inputs();
        self.clear_validation();

        debug!(name = %record.name, course = %record.course, grade = record.grade, "creating student");
        let created = self.exchange(self.gateway.create(&record)).await;
        let outcome = match created {
            Ok(key) => {
                self.apply_upsert(key, record);
                info!(%key, "student added");
                self.view
                    .show_transient_alert(AlertKind::Success, ADD_SUCCESS_MESSAGE);
                FlowOutcome::Added(key)
            }
            Err(err) => self.report_failure("add", err),
        };
        self.finish(outcome)
    }

    /// Load flow.
    ///
    /// Fetched records are merged into the roster: repeated loads add to it
    /// and overwrite matching keys, they never clear it. Keys whose delete is
    /// in flight, or was confirmed while this fetch was outstanding, are not
    /// merged. The returned count is the number of records merged.
    pub async fn load(&self) -> FlowOutcome {
        let _guard = PendingGuard::acquire(&self.pending, Slot::Load);
        debug!("fetching roster");
        let outcome = match self.exchange(self.gateway.fetch_all()).await {
            Ok(entries) => {
                let stale = self.pending.lock().stale_keys();
                let mut count = 0;
                for (key, record) in entries {
                    if stale.contains(&key) {
                        debug!(%key, "skipping fetched row deleted meanwhile");
                        continue;
                    }
                    self.apply_upsert(key, record);
                    count += 1;
                }
                info!(count, "roster loaded");
                self.view
                    .show_transient_alert(AlertKind::Success, LOAD_SUCCESS_MESSAGE);
                FlowOutcome::Loaded(count)
            }
            Err(err) => self.report_failure("load", err),
        };
        self.finish(outcome)
    }

    /// First step of the delete flow: ask the user to confirm.
    pub fn request_delete(&self, key: StudentKey) -> DeleteConfirmation {
        self.view.show_delete_confirmation(key);
        DeleteConfirmation { key }
    }

    /// Dismisses a pending confirmation without contacting the server.
    pub fn cancel_delete(&self, confirmation: DeleteConfirmation) -> FlowOutcome {
        debug!(key = %confirmation.key, "delete cancelled");
        self.finish(FlowOutcome::Cancelled)
    }

    /// Second step of the delete flow: delete the confirmed key.
    pub async fn confirm_delete(&self, confirmation: DeleteConfirmation) -> FlowOutcome {
        let key = confirmation.key;
        let Some(_guard) = PendingGuard::acquire(&self.pending, Slot::Delete(key)) else {
            debug!(%key, "delete ignored, already in flight");
            self.view
                .show_transient_alert(AlertKind::Failure, DELETE_BUSY_MESSAGE);
            return self.finish(FlowOutcome::Busy);
        };

        debug!(%key, "deleting student");
        let outcome = match self.exchange(self.gateway.remove(key)).await {
            Ok(()) => {
                self.pending.lock().record_delete(key);
                self.roster.lock().remove(key);
                self.view.remove_row(key);
                info!(%key, "student deleted");
                self.view
                    .show_transient_alert(AlertKind::Success, DELETE_SUCCESS_MESSAGE);
                FlowOutcome::Deleted(key)
            }
            Err(err) => self.report_failure("delete", err),
        };
        self.finish(outcome)
    }

    /// Runs one gateway exchange under the request timeout.
    async fn exchange<T>(
        &self,
        call: impl Future<Output = Result<T, SyncError>>,
    ) -> Result<T, SyncError> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_elapsed) => {
                let timeout_ms = u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX);
                Err(TransportError::Timeout { timeout_ms }.into())
            }
        }
    }

    /// Inserts a confirmed record and draws it, replacing any existing row.
    fn apply_upsert(&self, key: StudentKey, record: StudentRecord) {
        let previous = self.roster.lock().add(key, record.clone());
        if previous.is_some() {
            self.view.remove_row(key);
        }
        self.view.render_row(key, &record);
    }

    fn report_failure(&self, flow: &'static str, err: SyncError) -> FlowOutcome {
        match err {
            SyncError::Application { .. } => {
                let message = err.to_string();
                warn!(flow, %message, "request rejected by server");
                self.view.show_transient_alert(AlertKind::Failure, &message);
                FlowOutcome::Rejected(message)
            }
            SyncError::Transport(transport) => {
                warn!(flow, error = %transport, "grade service unreachable");
                self.view.show_fatal_error_modal();
                FlowOutcome::Unreachable(transport)
            }
        }
    }

    fn clear_validation(&self) {
        for field in Field::ALL {
            self.view.clear_field_validation_state(field);
        }
    }

    /// Renders the average from the roster as it is now.
    fn finish(&self, outcome: FlowOutcome) -> FlowOutcome {
        let average = self.roster.lock().average();
        self.view.render_average(average);
        outcome
    }
}
