//! Implements a struct that holds the state of the REST server.

use std::path::PathBuf;

use axum::extract::FromRef;

use crate::{config::CorsPolicy, db::Database};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database holding records and categories.
    pub database: Database,

    /// The directory containing the built frontend, including `index.html`.
    pub dist_dir: PathBuf,

    /// Which origins may call the API from a browser.
    pub cors_policy: CorsPolicy,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(database: Database, dist_dir: impl Into<PathBuf>, cors_policy: CorsPolicy) -> Self {
        Self {
            database,
            dist_dir: dist_dir.into(),
            cors_policy,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}
