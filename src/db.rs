//! Owns the SQLite connection and the unit of work every operation runs in.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error,
    category::{create_category_table, seed_default_categories},
    record::create_record_table,
};

/// A handle to the application's database.
///
/// Cloning the handle is cheap, all clones share the same connection.
#[derive(Debug, Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Wrap an already initialized connection.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
        }
    }

    /// Open the database file at `path`.
    ///
    /// If the file does not exist yet, it is created along with the tables and the default
    /// categories. An existing database is only checked for missing tables and is never reseeded.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the database cannot be initialized.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let is_new = !path.exists();

        if is_new {
            tracing::warn!("No database found at {path:?}, creating a new one");
        }

        let connection = Connection::open(path)?;
        initialize(&connection)?;

        if is_new {
            seed_default_categories(&connection)?;
        }

        Ok(Self::new(connection))
    }

    /// Create a new, seeded database that only lives in memory.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory()?;
        initialize(&connection)?;
        seed_default_categories(&connection)?;

        Ok(Self::new(connection))
    }

    /// Run `operation` as a single unit of work.
    ///
    /// The connection is locked and a transaction is started before `operation` is called.
    /// The transaction is committed if `operation` returns `Ok`, otherwise it is rolled back
    /// and the error is returned. The lock is released before this function returns.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned, any error from `operation`,
    /// or an SQL error if the transaction cannot be started or committed.
    pub fn unit_of_work<T, F>(&self, operation: F) -> Result<T, Error>
    where
        F: FnOnce(&Transaction) -> Result<T, Error>,
    {
        let mut connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        let transaction = connection.transaction()?;

        // Dropping an uncommitted transaction rolls it back.
        let result = operation(&transaction)?;

        transaction.commit()?;

        Ok(result)
    }
}

/// Enable foreign keys and create the application tables if they do not exist.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must come first.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_record_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
