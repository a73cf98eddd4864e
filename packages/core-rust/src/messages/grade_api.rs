//! Request and response bodies of the remote grade API.
//!
//! Requests are sent as form-encoded POST bodies; responses are JSON objects
//! carrying an explicit `success` flag. Field names match the wire format
//! exactly (`api_key`, `student_id`, `new_id`), so no renaming is applied.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::serde_number;
use crate::types::{StudentKey, StudentRecord};

// ---------------------------------------------------------------------------
// Endpoint paths
// ---------------------------------------------------------------------------

/// Path of the read-all endpoint, relative to the API base URL.
pub const FETCH_ALL_PATH: &str = "get";
/// Path of the create-one endpoint.
pub const CREATE_PATH: &str = "create";
/// Path of the delete-one endpoint.
pub const DELETE_PATH: &str = "delete";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of a read-all request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchAllRequest {
    pub api_key: String,
}

/// Body of a create-one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    pub api_key: String,
    pub name: String,
    pub course: String,
    pub grade: u32,
}

impl CreateRequest {
    #[must_use]
    pub fn new(api_key: impl Into<String>, record: &StudentRecord) -> Self {
        Self {
            api_key: api_key.into(),
            name: record.name.clone(),
            course: record.course.clone(),
            grade: record.grade,
        }
    }
}

/// Body of a delete-one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub api_key: String,
    pub student_id: i64,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Fields present on every response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    errors: Vec<String>,
}

/// One student as returned by the read-all endpoint.
///
/// `id` and `grade` are accepted either as JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    #[serde(deserialize_with = "serde_number::deserialize_i64")]
    pub id: i64,
    pub name: String,
    pub course: String,
    #[serde(deserialize_with = "serde_number::deserialize_u32")]
    pub grade: u32,
}

impl StudentRow {
    #[must_use]
    pub fn into_entry(self) -> (StudentKey, StudentRecord) {
        (
            StudentKey(self.id),
            StudentRecord {
                name: self.name,
                course: self.course,
                grade: self.grade,
            },
        )
    }
}

/// Success payload of the read-all endpoint.
///
/// Rows are kept undecoded so that one malformed row does not fail the
/// whole fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchAllPayload {
    pub data: Vec<serde_json::Value>,
}

impl FetchAllPayload {
    /// Decodes every row, skipping (and logging) rows that do not describe
    /// a student, such as a fractional or negative grade.
    #[must_use]
    pub fn into_entries(self) -> Vec<(StudentKey, StudentRecord)> {
        self.data
            .into_iter()
            .filter_map(|row| match StudentRow::deserialize(&row) {
                Ok(row) => Some(row.into_entry()),
                Err(e) => {
                    warn!(%row, error = %e, "skipping malformed student row");
                    None
                }
            })
            .collect()
    }
}

/// Success payload of the create-one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePayload {
    #[serde(deserialize_with = "serde_number::deserialize_i64")]
    pub new_id: i64,
}

/// Success payload of the delete-one endpoint, which carries nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ack {}

/// Outcome of decoding a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// `success: true` and the payload parsed.
    Success(T),
    /// `success: false` with the server's error strings, in order.
    Rejected(Vec<String>),
}

/// Reasons a body could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("body is not valid JSON: {0}")]
    Json(String),
    #[error("missing or invalid `success` flag: {0}")]
    Envelope(String),
    #[error("success payload has unexpected shape: {0}")]
    Payload(String),
}

/// Decodes a response body into its success payload or rejection.
///
/// # Errors
///
/// Returns [`DecodeError`] when the body is not JSON, lacks a boolean
/// `success` flag, or a successful body does not match `T`.
pub fn decode_response<T>(body: &[u8]) -> Result<Decoded<T>, DecodeError>
where
    T: serde::de::DeserializeOwned,
{
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| DecodeError::Json(e.to_string()))?;
    let envelope =
        Envelope::deserialize(&value).map_err(|e| DecodeError::Envelope(e.to_string()))?;
    if !envelope.success {
        return Ok(Decoded::Rejected(envelope.errors));
    }
    serde_json::from_value(value)
        .map(Decoded::Success)
        .map_err(|e| DecodeError::Payload(e.to_string()))
}
