//! Pure helpers for validating input and rendering contacts.
//!
//! Empty strings count as absent everywhere here: the CRM returns `""` for
//! cleared properties as often as it omits them.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::types::Contact;

pub const UNNAMED_CONTACT: &str = "Unnamed Contact";
pub const UNKNOWN_INITIALS: &str = "U";
pub const INVALID_DATE: &str = "Invalid Date";

// ASCII digits only; `\d` would also accept other Unicode digits.
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("ZIP pattern is valid"));

/// `NNNNN` or `NNNNN-NNNN` after trimming surrounding whitespace.
pub fn validate_zip_code(zip: &str) -> bool {
    ZIP_RE.is_match(zip.trim())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

pub fn contact_display_name(contact: &Contact) -> String {
    let props = &contact.properties;
    match (present(&props.firstname), present(&props.lastname)) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        (Some(first), None) => first.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => UNNAMED_CONTACT.to_string(),
    }
}

/// Up to two uppercase letters from the first and last name.
pub fn contact_initials(contact: &Contact) -> String {
    let props = &contact.properties;
    let initials: String = [present(&props.firstname), present(&props.lastname)]
        .into_iter()
        .flatten()
        .filter_map(|name| name.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        UNKNOWN_INITIALS.to_string()
    } else {
        initials
    }
}

pub fn has_complete_location_data(contact: &Contact) -> bool {
    let props = &contact.properties;
    present(&props.zip).is_some() && present(&props.city).is_some()
}

/// Short US-style date (`Jan 5, 2024`) in UTC.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}
