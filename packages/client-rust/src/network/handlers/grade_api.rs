//! Grade API endpoint handlers: read-all, create-one, delete-one.
//!
//! Every endpoint takes a form-encoded body and answers `200 OK` with a JSON
//! object. Rejections are reported in-band as `success: false` with a list of
//! error strings, never as HTTP error statuses, matching the hosted API.

use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use roster_core::validation::{parse_grade, validate_course, validate_name};
use roster_core::{Field, StudentRecord};

use super::AppState;

pub const INVALID_API_KEY: &str = "invalid api key";
pub const INVALID_STUDENT_ID: &str = "invalid student_id";
pub const STUDENT_NOT_FOUND: &str = "student not found";

/// Union of every field the grade endpoints read. Absent fields are `None`
/// so that a missing value becomes an in-band rejection rather than an
/// extractor error.
#[derive(Debug, Default, Deserialize)]
pub struct ApiForm {
    pub api_key: Option<String>,
    pub name: Option<String>,
    pub course: Option<String>,
    pub grade: Option<String>,
    pub student_id: Option<String>,
}

fn rejected(errors: &[String]) -> Json<Value> {
    Json(json!({ "success": false, "errors": errors }))
}

fn authorize(state: &AppState, form: &ApiForm) -> Result<(), Json<Value>> {
    match form.api_key.as_deref() {
        Some(key) if state.config.accepts(key) => Ok(()),
        _ => {
            debug!("request with unknown api key");
            Err(rejected(&[INVALID_API_KEY.to_string()]))
        }
    }
}

/// Handles POST `/get`: returns every stored student.
pub async fn fetch_all_handler(
    State(state): State<AppState>,
    Form(form): Form<ApiForm>,
) -> Json<Value> {
    if let Err(response) = authorize(&state, &form) {
        return response;
    }
    Json(json!({ "success": true, "data": state.store.rows() }))
}

/// Handles POST `/create`: validates and stores a student, returning its id.
///
/// Field checks reuse the client-side validator so both sides agree on what
/// a valid student is. Each error is prefixed with its field name.
pub async fn create_handler(
    State(state): State<AppState>,
    Form(form): Form<ApiForm>,
) -> Json<Value> {
    if let Err(response) = authorize(&state, &form) {
        return response;
    }

    let name = form.name.unwrap_or_default();
    let course = form.course.unwrap_or_default();
    let grade = form.grade.unwrap_or_default();

    let mut errors: Vec<String> = Vec::new();
    errors.extend(validate_name(&name).iter().map(|e| format!("{}: {e}", Field::Name)));
    errors.extend(validate_course(&course).iter().map(|e| format!("{}: {e}", Field::Course)));
    let grade = match parse_grade(&grade) {
        Ok(grade) => Some(grade),
        Err(e) => {
            errors.push(format!("{}: {e}", Field::Grade));
            None
        }
    };

    match grade {
        Some(grade) if errors.is_empty() => {
            let id = state.store.insert(StudentRecord::new(name, course, grade));
            info!(id, "student created");
            Json(json!({ "success": true, "new_id": id }))
        }
        _ => rejected(&errors),
    }
}

/// Handles POST `/delete`: removes a student by id.
pub async fn delete_handler(
    State(state): State<AppState>,
    Form(form): Form<ApiForm>,
) -> Json<Value> {
    if let Err(response) = authorize(&state, &form) {
        return response;
    }

    let Some(id) = form
        .student_id
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
    else {
        return rejected(&[INVALID_STUDENT_ID.to_string()]);
    };

    if state.store.remove(id).is_some() {
        info!(id, "student deleted");
        Json(json!({ "success": true }))
    } else {
        rejected(&[STUDENT_NOT_FOUND.to_string()])
    }
}
