//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/delete_record/{record_id}', use
//! `format_endpoint` in tests.

/// Any API route that is not listed below.
pub const API_FALLBACK: &str = "/api/{*path}";

/// The route to create a record.
pub const ADD_RECORD: &str = "/api/add_record";
/// The route to list all records.
pub const GET_RECORDS: &str = "/api/get_records";
/// The route to delete a record.
pub const DELETE_RECORD: &str = "/api/delete_record/{record_id}";
/// The route to update some fields of a record.
pub const UPDATE_RECORD: &str = "/api/update_record/{record_id}";
/// The route to list all categories.
pub const GET_CATEGORIES: &str = "/api/get_categories";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace and ends with a right brace.
/// For example, in the endpoint path '/api/delete_record/{record_id}', '{record_id}' is the
/// parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
