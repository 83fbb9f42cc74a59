use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    Error, RecordId,
    db::Database,
    message::Message,
    record::{RecordPatch, update_record},
};

/// A route handler for changing some or all fields of a record.
///
/// Responds with `{message, record_id}` on success, 404 if the record does not exist and 400
/// for any other error.
pub async fn update_record_endpoint(
    State(database): State<Database>,
    Path(record_id): Path<RecordId>,
    payload: Result<Json<RecordPatch>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(patch) =
        payload.map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))?;

    tracing::debug!("Updating record {record_id} with {patch:?}");

    let record_id = update_record(&database, record_id, patch).inspect_err(|error| {
        tracing::warn!("Could not update record {record_id}: {error}");
    })?;

    Ok(Message::with_record_id("Record updated", record_id))
}
