//! Domain DTOs for the contacts API.
//!
//! # Design
//! These mirror the backend's JSON but are defined independently of the
//! mock-server crate; the integration tests catch schema drift. Top-level
//! contact fields are camelCase on the wire, `properties` keys are the CRM's
//! lowercase names.

use serde::{Deserialize, Deserializer, Serialize};

/// CRM properties attached to a contact. Only `createdate`,
/// `lastmodifieddate` and `hs_object_id` are always present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub createdate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    pub hs_object_id: String,
    pub lastmodifieddate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// A contact record as returned by the server. Never patched locally; every
/// change is a round trip and the server's copy replaces the held one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub properties: ContactProperties,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListContactsResponse {
    pub results: Vec<Contact>,
}

/// Envelopes only promise `success`; the payload fields may be missing or
/// `null` when it is false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfoResponse {
    pub success: bool,
    #[serde(default)]
    pub contact: Option<Contact>,
}

/// Body of `POST /update-zip/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateZipRequest {
    pub zip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateZipResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "nullable_string")]
    pub message: String,
    #[serde(default)]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCityResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "nullable_string")]
    pub contact_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub zip: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub message: String,
}

/// `null` reads as an empty string.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error body the server sends with a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
