//! Validates client requests for records and applies them to the database.
//!
//! Every function runs in its own unit of work, so a failed call never leaves a partial write
//! behind.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    CategoryId, Error, RecordId,
    category::resolve_category,
    date::parse_date,
    db::Database,
    record::{
        RecordPatch, RecordView,
        amount::parse_amount,
        core::{get_record, get_record_views, insert_record, remove_record, save_record},
    },
};

/// The fields a client sends to create a record, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewRecord {
    /// The date as `YYYY-MM-DD` text.
    #[serde(default)]
    pub date: String,
    /// The amount as a JSON number or numeric string.
    #[serde(default)]
    pub amount: Value,
    /// The ID of the category, stored without checking that it exists first.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Free text notes.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Validate and store a new record, returning its ID.
///
/// Unlike [update_record], the category is only ever taken from `category_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidDate] or [Error::InvalidAmount] if the date or amount are malformed,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or another persistence error if the database fails.
pub fn create_record(database: &Database, new_record: NewRecord) -> Result<RecordId, Error> {
    let date = parse_date(&new_record.date)?;
    let amount = parse_amount(&new_record.amount)?;

    let id = database.unit_of_work(|transaction| {
        insert_record(
            date,
            amount,
            new_record.category_id,
            new_record.remarks.as_deref(),
            transaction,
        )
    })?;

    tracing::info!("Created record {id}");

    Ok(id)
}

/// Get every record with its category name, in the order the records were created.
///
/// # Errors
/// Returns a persistence error if the database fails.
pub fn list_records(database: &Database) -> Result<Vec<RecordView>, Error> {
    database.unit_of_work(|transaction| get_record_views(transaction))
}

/// Apply the fields present in `patch` to the record `id` and return the ID.
///
/// Fields are applied in the order date, amount, category, remarks. The category is set from
/// `category_id` when it is given, otherwise from the `category` name via [resolve_category].
/// The first invalid field aborts the update and nothing is changed, including any category
/// that would have been created.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingRecord] if there is no record with `id`,
/// - [Error::InvalidDate] or [Error::InvalidAmount] if a given date or amount is malformed,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or another persistence error if the database fails.
pub fn update_record(
    database: &Database,
    id: RecordId,
    patch: RecordPatch,
) -> Result<RecordId, Error> {
    database.unit_of_work(|transaction| {
        let mut record = get_record(id, transaction).map_err(|error| match error {
            Error::NotFound => Error::UpdateMissingRecord,
            error => error,
        })?;

        if let Some(date) = &patch.date {
            record.date = parse_date(date.as_deref().unwrap_or_default())?;
        }

        if let Some(amount) = &patch.amount {
            record.amount = parse_amount(amount)?;
        }

        if let Some(category_id) =
            resolve_category(patch.category_id, patch.category.as_deref(), transaction)?
        {
            record.category_id = Some(category_id);
        }

        if let Some(remarks) = patch.remarks {
            record.remarks = remarks;
        }

        save_record(&record, transaction)
    })?;

    tracing::info!("Updated record {id}");

    Ok(id)
}

/// Delete the record `id`.
///
/// # Errors
/// Returns [Error::DeleteMissingRecord] if there is no record with `id`, or a persistence
/// error if the database fails.
pub fn delete_record(database: &Database, id: RecordId) -> Result<(), Error> {
    database.unit_of_work(|transaction| remove_record(id, transaction))?;

    tracing::info!("Deleted record {id}");

    Ok(())
}
