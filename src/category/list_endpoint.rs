use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::{
    CategoryId, Error,
    category::{Category, get_all_categories},
    db::Database,
};

/// A category as it is sent to clients.
#[derive(Debug, Serialize)]
struct CategoryResponse {
    id: CategoryId,
    name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
        }
    }
}

/// A route handler that responds with every category as a JSON array of `{id, name}`.
pub async fn get_categories_endpoint(
    State(database): State<Database>,
) -> Result<impl IntoResponse, Error> {
    let categories = database.unit_of_work(|transaction| get_all_categories(transaction))?;

    let categories: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(categories))
}
