//! Expense tracker is a small backend for recording personal income and expenses.
//!
//! Records are dated amounts with an optional category and remarks. This
//! library provides a JSON API for creating, listing, editing and deleting
//! records, listing categories, and serves a prebuilt single-page frontend.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod config;
mod database_id;
mod date;
mod db;
mod endpoints;
mod logging;
mod message;
mod record;
mod routing;

pub use app_state::AppState;
pub use category::{
    Category, CategoryName, DEFAULT_CATEGORIES, get_all_categories, get_category,
    resolve_category,
};
pub use config::CorsPolicy;
pub use database_id::{CategoryId, DatabaseId, RecordId};
pub use db::{Database, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_BODY_SIZE, logging_middleware};
pub use record::{
    NewRecord, Record, RecordPatch, RecordView, create_record, delete_record, list_records,
    update_record,
};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date could not be parsed with the `YYYY-MM-DD` format.
    ///
    /// Callers should pass in the date string that caused the error.
    #[error("invalid date \"{0}\", expected a date in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// An amount was not a number.
    ///
    /// Callers should pass in the JSON text of the offending value.
    #[error("invalid amount {0}, expected a number")]
    InvalidAmount(String),

    /// The request body could not be parsed as the expected JSON object.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a record that does not exist
    #[error("tried to update a record that is not in the database")]
    UpdateMissingRecord,

    /// Tried to delete a record that does not exist
    #[error("tried to delete a record that is not in the database")]
    DeleteMissingRecord,

    /// The category ID used to write a record did not match a valid category.
    ///
    /// Category IDs are not checked when a request is received, so this error
    /// is only raised once the database rejects the write.
    #[error("the category ID {0:?} does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

/// The broad classes of [Error], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The client sent a malformed date, amount or body.
    Validation,
    /// The record the client referred to does not exist.
    NotFound,
    /// The database failed or rejected the write.
    Persistence,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDate(_)
            | Error::InvalidAmount(_)
            | Error::InvalidRequestBody(_)
            | Error::EmptyCategoryName => ErrorKind::Validation,
            Error::NotFound | Error::UpdateMissingRecord | Error::DeleteMissingRecord => {
                ErrorKind::NotFound
            }
            Error::InvalidCategory(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                ErrorKind::Persistence
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(None),
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Persistence => {
                tracing::error!("A database error occurred: {}", self);
                StatusCode::BAD_REQUEST
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
