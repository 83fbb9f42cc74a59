//! Turns the category a client refers to into a category ID.

use rusqlite::Connection;

use crate::{
    CategoryId, Error,
    category::{CategoryName, create_category, get_category_by_name},
};

/// Resolve a category reference to a category ID, creating the category if needed.
///
/// - `category_id` takes precedence and is returned as-is. It is not checked against the
///   category table, a bad ID is only rejected when the record referring to it is written.
/// - Otherwise a non-blank `category_name` is looked up by exact name and a new category is
///   created if none exists.
/// - Otherwise there is no category and `None` is returned.
///
/// Run this inside the same unit of work as the write that uses the ID so that a created
/// category is rolled back with it.
///
/// # Errors
/// Returns an SQL error if the lookup or insert fails.
pub fn resolve_category(
    category_id: Option<CategoryId>,
    category_name: Option<&str>,
    connection: &Connection,
) -> Result<Option<CategoryId>, Error> {
    if let Some(category_id) = category_id {
        return Ok(Some(category_id));
    }

    let Some(name) = category_name.and_then(|name| CategoryName::new(name).ok()) else {
        return Ok(None);
    };

    match get_category_by_name(&name, connection) {
        Ok(category) => {
            tracing::debug!("Found category {:?} with ID {}", category.name, category.id);
            Ok(Some(category.id))
        }
        Err(Error::NotFound) => {
            let category = create_category(name, connection)?;
            tracing::info!("Created category {:?} with ID {}", category.name, category.id);
            Ok(Some(category.id))
        }
        Err(error) => Err(error),
    }
}
