//! Wire-compatible message schemas for the remote grade API.
//!
//! The API is a plain request/response protocol: form-encoded POST bodies go
//! out, JSON objects with a `success` flag come back. Decoding is kept here,
//! free of any HTTP client, so every gateway shares the same interpretation
//! of a response.

pub mod grade_api;
pub mod serde_number;

pub use grade_api::{
    decode_response, Ack, CreatePayload, CreateRequest, DecodeError, Decoded, DeleteRequest,
    FetchAllPayload, FetchAllRequest, StudentRow, CREATE_PATH, DELETE_PATH, FETCH_ALL_PATH,
};
