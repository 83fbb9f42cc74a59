//! Categories for grouping records, e.g. 'Food' or 'Salary'.

mod db;
mod domain;
mod list_endpoint;
mod resolve;

pub use db::{
    DEFAULT_CATEGORIES, create_category, create_category_table, get_all_categories,
    get_category, get_category_by_name, seed_default_categories,
};
pub use domain::{Category, CategoryName};
pub use list_endpoint::get_categories_endpoint;
pub use resolve::resolve_category;
