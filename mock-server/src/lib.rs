use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// ZIP prefixes the backend can resolve to a city.
pub const CITY_TABLE: &[(&str, &str)] = &[
    ("02108", "Boston"),
    ("10001", "New York"),
    ("60601", "Chicago"),
    ("73301", "Austin"),
    ("94105", "San Francisco"),
    ("98101", "Seattle"),
];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContactProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub createdate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    pub hs_object_id: String,
    pub lastmodifieddate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub properties: ContactProperties,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

impl Contact {
    pub fn new(id: &str, firstname: Option<&str>, lastname: Option<&str>) -> Self {
        let now = timestamp();
        Self {
            id: id.to_string(),
            properties: ContactProperties {
                createdate: now.clone(),
                hs_object_id: id.to_string(),
                lastmodifieddate: now.clone(),
                firstname: firstname.map(str::to_string),
                lastname: lastname.map(str::to_string),
                ..Default::default()
            },
            created_at: now.clone(),
            updated_at: now,
            archived: false,
        }
    }

    pub fn with_location(mut self, zip: Option<&str>, city: Option<&str>) -> Self {
        self.properties.zip = zip.map(str::to_string);
        self.properties.city = city.map(str::to_string);
        self
    }

    fn touch(&mut self) {
        let now = timestamp();
        self.properties.lastmodifieddate = now.clone();
        self.updated_at = now;
    }
}

#[derive(Serialize, Deserialize)]
pub struct ListContactsResponse {
    pub results: Vec<Contact>,
}

#[derive(Serialize, Deserialize)]
pub struct ContactInfoResponse {
    pub success: bool,
    pub contact: Contact,
}

#[derive(Deserialize)]
pub struct ZipBody {
    pub zip: String,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateZipResponse {
    pub success: bool,
    pub message: String,
    pub contact: Contact,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCityResponse {
    pub success: bool,
    pub contact_id: String,
    pub zip: String,
    pub city: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub success: bool,
    pub zip: String,
    pub city: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

pub type Db = Arc<RwLock<HashMap<String, Contact>>>;

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
            stack: None,
        }),
    )
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `NNNNN` or `NNNNN-NNNN`, ASCII digits only.
pub fn is_valid_zip(zip: &str) -> bool {
    let bytes = zip.as_bytes();
    let digits = |s: &[u8]| s.iter().all(u8::is_ascii_digit);
    match bytes.len() {
        5 => digits(bytes),
        10 => digits(&bytes[..5]) && bytes[5] == b'-' && digits(&bytes[6..]),
        _ => false,
    }
}

/// City for a ZIP, looked up by its 5-digit prefix.
pub fn city_for_zip(zip: &str) -> Option<&'static str> {
    let prefix = zip.get(..5)?;
    CITY_TABLE
        .iter()
        .find(|(z, _)| *z == prefix)
        .map(|(_, city)| *city)
}

/// Sample contacts covering every name and location combination.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::new("101", Some("Ann"), Some("Lee")).with_location(Some("10001"), Some("New York")),
        Contact::new("102", Some("Bo"), None),
        Contact::new("103", None, Some("Diaz")).with_location(Some("94105"), Some("San Francisco")),
        Contact::new("104", None, None),
        Contact::new("105", Some("Eve"), Some("Stone")).with_location(Some("60601"), None),
    ]
}

pub fn app() -> Router {
    app_with(seed_contacts())
}

pub fn app_with(contacts: Vec<Contact>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        contacts.into_iter().map(|c| (c.id.clone(), c)).collect(),
    ));
    Router::new()
        .route("/list-contacts", get(list_contacts))
        .route("/contact-info/{id}", get(contact_info))
        .route("/update-zip/{id}", post(update_zip))
        .route("/update-city/{id}", get(update_city))
        .route("/geocode", post(geocode))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_contacts(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<ListContactsResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize;
    let contacts = db.read().await;
    let mut results: Vec<Contact> = contacts.values().cloned().collect();
    results.sort_by(|a, b| match (a.id.parse::<u64>(), b.id.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.id.cmp(&b.id),
    });
    results.truncate(limit);
    Json(ListContactsResponse { results })
}

async fn contact_info(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<ContactInfoResponse>, Failure> {
    let contacts = db.read().await;
    let contact = contacts
        .get(&id)
        .cloned()
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("Contact {id} not found")))?;
    Ok(Json(ContactInfoResponse {
        success: true,
        contact,
    }))
}

async fn update_zip(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ZipBody>,
) -> Result<Json<UpdateZipResponse>, Failure> {
    let zip = input.zip.trim();
    if !is_valid_zip(zip) {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Invalid ZIP code: {zip:?}")));
    }

    let mut contacts = db.write().await;
    let contact = contacts
        .get_mut(&id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("Contact {id} not found")))?;
    contact.properties.zip = Some(zip.to_string());
    contact.touch();
    info!(contact_id = %id, zip, "zip updated");

    Ok(Json(UpdateZipResponse {
        success: true,
        message: format!("ZIP code updated to {zip}"),
        contact: contact.clone(),
    }))
}

async fn update_city(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<UpdateCityResponse>, Failure> {
    let mut contacts = db.write().await;
    let contact = contacts
        .get_mut(&id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("Contact {id} not found")))?;
    let zip = contact
        .properties
        .zip
        .clone()
        .filter(|z| !z.is_empty())
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, format!("Contact {id} has no ZIP code")))?;

    let Some(city) = city_for_zip(&zip) else {
        return Ok(Json(UpdateCityResponse {
            success: false,
            contact_id: id,
            message: format!("No city found for ZIP code {zip}"),
            zip,
            city: String::new(),
        }));
    };

    contact.properties.city = Some(city.to_string());
    contact.touch();
    info!(contact_id = %id, zip = %zip, city, "city updated");

    Ok(Json(UpdateCityResponse {
        success: true,
        contact_id: id,
        message: format!("City updated to {city}"),
        zip,
        city: city.to_string(),
    }))
}

async fn geocode(Json(input): Json<ZipBody>) -> Result<Json<GeocodeResponse>, Failure> {
    let zip = input.zip.trim();
    if !is_valid_zip(zip) {
        return Err(failure(StatusCode::BAD_REQUEST, format!("Invalid ZIP code: {zip:?}")));
    }
    let city = city_for_zip(zip)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("No city found for ZIP code {zip}")))?;
    Ok(Json(GeocodeResponse {
        success: true,
        zip: zip.to_string(),
        city: city.to_string(),
    }))
}
