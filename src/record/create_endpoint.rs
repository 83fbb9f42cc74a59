use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    Error,
    db::Database,
    message::Message,
    record::{NewRecord, create_record},
};

/// A route handler for creating a record from a JSON `{date, amount, category_id, remarks}` body.
pub async fn create_record_endpoint(
    State(database): State<Database>,
    payload: Result<Json<NewRecord>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(new_record) =
        payload.map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))?;

    let record_id = create_record(&database, new_record).inspect_err(|error| {
        tracing::warn!("Could not create record: {error}");
    })?;

    Ok(Message::with_record_id("Record added", record_id))
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{db::Database, endpoints, record::list_records};

    use super::create_record_endpoint;

    fn get_test_server() -> (TestServer, Database) {
        let database = Database::open_in_memory().unwrap();
        let app = Router::new()
            .route(endpoints::ADD_RECORD, post(create_record_endpoint))
            .with_state(database.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            database,
        )
    }

    #[tokio::test]
    async fn create_record_succeeds() {
        let (server, database) = get_test_server();

        let response = server
            .post(endpoints::ADD_RECORD)
            .json(&json!({
                "date": "2024-01-15",
                "amount": -42.5,
                "category_id": 1,
                "remarks": "lunch"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["record_id"], 1);
        assert!(body["message"].is_string());
        assert_eq!(list_records(&database).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_record_with_bad_date_is_bad_request() {
        let (server, database) = get_test_server();

        let response = server
            .post(endpoints::ADD_RECORD)
            .json(&json!({"date": "2024/01/15", "amount": 1}))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("2024/01/15"));
        assert!(list_records(&database).unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_record_with_malformed_json_is_bad_request() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::ADD_RECORD)
            .text("{not json")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
    }
}
