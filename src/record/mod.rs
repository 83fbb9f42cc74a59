//! Record management for the expense tracker.
//!
//! This module contains everything related to records:
//! - The `Record` model and database functions for storing and querying records
//! - The service functions that validate and apply create, list, update and delete requests
//! - The JSON route handlers that expose the service over HTTP

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod patch;
mod service;
mod update_endpoint;

pub use self::core::{Record, RecordView, create_record_table};
pub use create_endpoint::create_record_endpoint;
pub use delete_endpoint::delete_record_endpoint;
pub use list_endpoint::get_records_endpoint;
pub use patch::RecordPatch;
pub use service::{NewRecord, create_record, delete_record, list_records, update_record};
pub use update_endpoint::update_record_endpoint;
