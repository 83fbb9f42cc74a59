use axum::{Json, extract::State, response::IntoResponse};

use crate::{Error, db::Database, record::list_records};

/// A route handler that responds with every record and its category name as a JSON array.
pub async fn get_records_endpoint(
    State(database): State<Database>,
) -> Result<impl IntoResponse, Error> {
    let records = list_records(&database)?;

    Ok(Json(records))
}
