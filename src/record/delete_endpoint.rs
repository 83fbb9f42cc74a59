use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{Error, RecordId, db::Database, message::Message, record::delete_record};

/// A route handler for deleting a record, responds with 404 if the record does not exist.
pub async fn delete_record_endpoint(
    State(database): State<Database>,
    Path(record_id): Path<RecordId>,
) -> Result<impl IntoResponse, Error> {
    tracing::debug!("Deleting record {record_id}");

    delete_record(&database, record_id).inspect_err(|error| {
        tracing::warn!("Could not delete record {record_id}: {error}");
    })?;

    Ok(Message::new("Record deleted"))
}
