//! Outcome of the two-step ZIP-then-city location update.
//!
//! The two writes are independent server calls. Nothing is retried or
//! rolled back, so ZIP and city can disagree after a partial failure.
//! Whatever the outcome, the held copy of the contact is out of date and the
//! caller must fetch it again.

/// Non-error results of `ContactService::update_location`. Hard failures
/// (transport, HTTP status) are returned as `ApiError` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationUpdate {
    /// ZIP stored and city re-derived from it by the server.
    Updated {
        zip: String,
        city: String,
        message: String,
    },

    /// ZIP stored, but the city update reported failure. The city still
    /// holds its old value.
    CityFailed { zip: String, message: String },

    /// The server declined the ZIP; city was never requested.
    ZipRejected { message: String },
}

impl LocationUpdate {
    /// True when the new ZIP was committed server-side.
    pub fn zip_committed(&self) -> bool {
        !matches!(self, LocationUpdate::ZipRejected { .. })
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, LocationUpdate::CityFailed { .. })
    }

    /// Always true: local copies are never patched in place, so every
    /// outcome must be followed by a re-fetch.
    pub fn requires_refresh(&self) -> bool {
        true
    }

    /// One-line summary suitable for a status message.
    pub fn summary(&self) -> String {
        match self {
            LocationUpdate::Updated { zip, city, .. } => {
                format!("ZIP code updated to {zip} and city updated to {city}!")
            }
            LocationUpdate::CityFailed { .. } => {
                "ZIP code updated! City update failed - please try again.".to_string()
            }
            LocationUpdate::ZipRejected { message } if !message.is_empty() => message.clone(),
            LocationUpdate::ZipRejected { .. } => "ZIP code update was not accepted".to_string(),
        }
    }
}
