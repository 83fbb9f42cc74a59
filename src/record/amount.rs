//! Validation for monetary amounts sent by clients.

use serde_json::Value;

use crate::Error;

/// Read an amount from a JSON value.
///
/// Amounts are normally JSON numbers, but strings holding a number (e.g. `"12.50"`) are
/// accepted too since form inputs often send them that way.
///
/// # Errors
/// Returns [Error::InvalidAmount] for any other value, including `null`, and for strings that
/// are not a finite number.
pub fn parse_amount(value: &Value) -> Result<f64, Error> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    amount
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::InvalidAmount(value.to_string()))
}
