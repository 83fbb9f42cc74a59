//! The JSON bodies sent to clients when a write succeeds.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::RecordId;

/// A success message, optionally with the ID of the record that was written.
#[derive(Debug, Serialize, PartialEq)]
pub struct Message {
    /// Human readable confirmation.
    pub message: &'static str,
    /// The record the message is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
}

impl Message {
    /// A message with no record ID.
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            record_id: None,
        }
    }

    /// A message about the record `record_id`.
    pub fn with_record_id(message: &'static str, record_id: RecordId) -> Self {
        Self {
            message,
            record_id: Some(record_id),
        }
    }
}

impl IntoResponse for Message {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
