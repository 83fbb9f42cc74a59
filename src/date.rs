//! The date format used for all dates exchanged with clients.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// Dates are exchanged as `YYYY-MM-DD`, e.g. "2024-01-15".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Parse `text` as a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` does not match the format or is not a real calendar date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|error| {
        tracing::debug!("could not parse date {text:?}: {error}");
        Error::InvalidDate(text.to_owned())
    })
}
