//! Application router configuration for the JSON API and the frontend.

use axum::{
    Router, middleware,
    routing::{any, delete, get, post, put},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState, Error,
    category::get_categories_endpoint,
    endpoints,
    logging::logging_middleware,
    record::{
        create_record_endpoint, delete_record_endpoint, get_records_endpoint,
        update_record_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Paths outside `/api` are served from the frontend directory. Unknown paths fall back to
/// `index.html` so that the frontend's client-side routes survive a page reload.
pub fn build_router(state: AppState) -> Router {
    let index_html = state.dist_dir.join("index.html");
    let frontend = ServeDir::new(&state.dist_dir).fallback(ServeFile::new(index_html));

    let api_routes = Router::new()
        .route(endpoints::ADD_RECORD, post(create_record_endpoint))
        .route(endpoints::GET_RECORDS, get(get_records_endpoint))
        .route(endpoints::DELETE_RECORD, delete(delete_record_endpoint))
        .route(endpoints::UPDATE_RECORD, put(update_record_endpoint))
        .route(endpoints::GET_CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::API_FALLBACK, any(get_api_not_found))
        .layer(middleware::from_fn(logging_middleware));

    let cors_layer = state.cors_policy.layer();

    api_routes
        .fallback_service(frontend)
        .layer(cors_layer)
        .with_state(state)
}

async fn get_api_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, process};

    use axum::http::{HeaderName, HeaderValue};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{AppState, CorsPolicy, db::Database, endpoints};

    use super::build_router;

    fn create_dist_dir(name: &str) -> PathBuf {
        let dist_dir = env::temp_dir().join(format!("expense_tracker_{name}_{}", process::id()));
        fs::create_dir_all(dist_dir.join("assets")).expect("could not create dist dir");
        fs::write(dist_dir.join("index.html"), "<div id=\"app\"></div>").unwrap();
        fs::write(dist_dir.join("assets").join("app.js"), "console.log(1);").unwrap();
        dist_dir
    }

    fn get_test_server(name: &str, cors_policy: CorsPolicy) -> TestServer {
        let state = AppState::new(
            Database::open_in_memory().unwrap(),
            create_dist_dir(name),
            cors_policy,
        );

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn serves_index_at_root() {
        let server = get_test_server("root", CorsPolicy::AllowAll);

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("<div id=\"app\"></div>");
    }

    #[tokio::test]
    async fn serves_static_assets() {
        let server = get_test_server("assets", CorsPolicy::AllowAll);

        server
            .get("/assets/app.js")
            .await
            .assert_text("console.log(1);");
    }

    #[tokio::test]
    async fn unknown_frontend_path_falls_back_to_index() {
        let server = get_test_server("fallback", CorsPolicy::AllowAll);

        let response = server.get("/records").await;

        response.assert_status_ok();
        response.assert_text("<div id=\"app\"></div>");
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_not_found() {
        let server = get_test_server("api_404", CorsPolicy::AllowAll);

        let response = server.get("/api/does_not_exist").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn full_record_lifecycle() {
        let server = get_test_server("lifecycle", CorsPolicy::AllowAll);

        server
            .post(endpoints::ADD_RECORD)
            .json(&json!({"date": "2024-01-15", "amount": -42.5, "remarks": "lunch"}))
            .await
            .assert_status_ok();
        server
            .put("/api/update_record/1")
            .json(&json!({"category": "Travel"}))
            .await
            .assert_status_ok();

        let records: Value = server.get(endpoints::GET_RECORDS).await.json();
        assert_eq!(records[0]["category"], "Travel");

        let categories: Vec<Value> = server.get(endpoints::GET_CATEGORIES).await.json();
        assert!(categories.iter().any(|category| category["name"] == "Travel"));

        server
            .delete("/api/delete_record/1")
            .await
            .assert_status_ok();
        server
            .delete("/api/delete_record/1")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn allowed_origin_gets_cors_header() {
        let origin = "https://budget.example";
        let server = get_test_server(
            "cors",
            CorsPolicy::AllowList(vec![origin.to_owned()]),
        );

        let response = server
            .get(endpoints::GET_CATEGORIES)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static(origin),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get("access-control-allow-origin"),
            Some(&HeaderValue::from_static(origin))
        );
    }

    #[tokio::test]
    async fn allowed_origin_may_send_credentials() {
        let origin = "https://budget.example";
        let server = get_test_server(
            "cors_credentials",
            CorsPolicy::AllowList(vec![origin.to_owned()]),
        );

        let response = server
            .get(endpoints::GET_RECORDS)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static(origin),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get("access-control-allow-credentials"),
            Some(&HeaderValue::from_static("true"))
        );
    }

    #[tokio::test]
    async fn any_origin_is_not_given_credentials() {
        let server = get_test_server("cors_any", CorsPolicy::AllowAll);

        let response = server
            .get(endpoints::GET_RECORDS)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://elsewhere.example"),
            )
            .await;

        assert_eq!(
            response.headers().get("access-control-allow-origin"),
            Some(&HeaderValue::from_static("*"))
        );
        assert!(response.headers().get("access-control-allow-credentials").is_none());
    }
}
