//! Defines the core data models and database queries for records.

use rusqlite::{Connection, Row};
use serde::Serialize;
use time::Date;

use crate::{CategoryId, Error, RecordId, date::iso_date};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The ID of the record.
    pub id: RecordId,
    /// When the money was spent or earned.
    pub date: Date,
    /// The amount of money spent or earned.
    ///
    /// By convention negative amounts are expenses and positive amounts are income.
    pub amount: f64,
    /// The ID of the category the record is filed under, if any.
    pub category_id: Option<CategoryId>,
    /// Free text notes about the record.
    pub remarks: Option<String>,
}

/// A record joined with the name of its category, as it is sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    /// The ID of the record.
    pub id: RecordId,
    /// When the money was spent or earned, serialized as `YYYY-MM-DD`.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The ID of the category the record is filed under, if any.
    pub category_id: Option<CategoryId>,
    /// The name of the category, or an empty string if the record has no category.
    pub category: String,
    /// Free text notes about the record.
    pub remarks: Option<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a record and return its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if `category_id` does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn insert_record(
    date: Date,
    amount: f64,
    category_id: Option<CategoryId>,
    remarks: Option<&str>,
    connection: &Connection,
) -> Result<RecordId, Error> {
    connection
        .prepare(
            "INSERT INTO record (date, amount, category_id, remarks)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )?
        .query_row((date, amount, category_id, remarks), |row| row.get(0))
        .map_err(|error| map_category_error(error, category_id))
}

/// Retrieve a record from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid record,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_record(id: RecordId, connection: &Connection) -> Result<Record, Error> {
    let record = connection
        .prepare("SELECT id, date, amount, category_id, remarks FROM record WHERE id = :id")?
        .query_row(&[(":id", &id)], map_record_row)?;

    Ok(record)
}

/// Overwrite every field of the stored record with the same ID as `record`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingRecord] if there is no record with the ID,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn save_record(record: &Record, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE record
            SET date = ?1, amount = ?2, category_id = ?3, remarks = ?4
            WHERE id = ?5",
            (
                record.date,
                record.amount,
                record.category_id,
                record.remarks.as_deref(),
                record.id,
            ),
        )
        .map_err(|error| map_category_error(error, record.category_id))?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingRecord);
    }

    Ok(())
}

/// Delete a record by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingRecord] if the record does not exist.
pub fn remove_record(id: RecordId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM record WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingRecord);
    }

    Ok(())
}

/// Retrieve every record with its category name, in the order the records were created.
pub fn get_record_views(connection: &Connection) -> Result<Vec<RecordView>, Error> {
    connection
        .prepare(
            "SELECT record.id, record.date, record.amount, record.category_id,
                COALESCE(category.name, ''), record.remarks
            FROM record
            LEFT JOIN category ON category.id = record.category_id
            ORDER BY record.id ASC",
        )?
        .query_map([], |row| {
            Ok(RecordView {
                id: row.get(0)?,
                date: row.get(1)?,
                amount: row.get(2)?,
                category_id: row.get(3)?,
                category: row.get(4)?,
                remarks: row.get(5)?,
            })
        })?
        .map(|maybe_view| maybe_view.map_err(|error| error.into()))
        .collect()
}

/// Get the total number of records in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_records(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM record;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the record table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS record (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount REAL NOT NULL,
                category_id INTEGER,
                remarks TEXT,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_record_category ON record(category_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Record.
fn map_record_row(row: &Row) -> Result<Record, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let amount = row.get(2)?;
    let category_id = row.get(3)?;
    let remarks = row.get(4)?;

    Ok(Record {
        id,
        date,
        amount,
        category_id,
        remarks,
    })
}

fn map_category_error(error: rusqlite::Error, category_id: Option<CategoryId>) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::InvalidCategory(category_id),
        error => error.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
