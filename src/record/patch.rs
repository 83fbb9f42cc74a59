//! The partial update a client can send for a record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::CategoryId;

/// The fields to change on a record. Fields that are `None` are left as they are.
///
/// Nullable fields use a nested `Option` so that a field that was left out (`None`) can be told
/// apart from a field that was explicitly set to `null` (`Some(None)`).
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct RecordPatch {
    /// The new date as `YYYY-MM-DD` text. `Some(None)` is rejected as an invalid date.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub date: Option<Option<String>>,

    /// The new amount as an unvalidated JSON value, either a number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub amount: Option<Value>,

    /// The ID of the new category. Takes precedence over [RecordPatch::category].
    ///
    /// `null` is treated the same as leaving the field out.
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// The name of the new category, created if it does not exist yet.
    ///
    /// Ignored when `category_id` is set, or when the name is `null` or blank.
    #[serde(default)]
    pub category: Option<String>,

    /// The new remarks. `Some(None)` clears the remarks, `Some(Some(""))` stores empty remarks.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub remarks: Option<Option<String>>,
}

/// Wrap any value that is present in the JSON object, including `null`, in `Some`.
///
/// Missing fields never reach this function and fall back to `None` via `#[serde(default)]`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
