//! Contact operations on top of the request gateway.
//!
//! # Design
//! `ContactService` is stateless apart from its gateway. Reads unwrap their
//! envelopes; the two writes return their envelopes unchanged so callers can
//! inspect `success`. `update_location` sequences them and reports a
//! partial failure as a `LocationUpdate` value, not an error.
//!
//! Callers must re-fetch a contact after `update_location` returns, whatever
//! the outcome. `ContactManager` does this for you.

use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::display::validate_zip_code;
use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::gateway::{RequestGateway, RequestOptions};
use crate::http::{Transport, TransportError};
use crate::transport::ReqwestTransport;
use crate::types::{
    Contact, ContactInfoResponse, ListContactsResponse, UpdateCityResponse, UpdateZipRequest,
    UpdateZipResponse,
};
use crate::update::LocationUpdate;

/// `limit` used by `get_all_contacts` callers that have no preference.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

pub const CONTACT_FETCH_FAILED: &str = "Failed to fetch contact information";
pub const ZIP_REQUIRED: &str = "ZIP code is required";
pub const ZIP_INVALID: &str = "Please enter a valid ZIP code (e.g., 12345 or 12345-6789)";

#[derive(Debug, Clone)]
pub struct ContactService<T> {
    gateway: RequestGateway<T>,
}

impl ContactService<ReqwestTransport> {
    pub fn connect(config: &GatewayConfig) -> Result<Self, TransportError> {
        Ok(Self::new(RequestGateway::from_config(config)?))
    }
}

impl<T: Transport> ContactService<T> {
    pub fn new(gateway: RequestGateway<T>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &RequestGateway<T> {
        &self.gateway
    }

    /// The list endpoint's `results`, in server order.
    pub async fn get_all_contacts(&self, limit: u32) -> Result<Vec<Contact>, ApiError> {
        let response: ListContactsResponse = self
            .gateway
            .request(&Endpoint::ListContacts { limit }, RequestOptions::get())
            .await?;
        Ok(response.results)
    }

    /// Fails with `ApiError::Domain` when the envelope reports `success: false`
    /// or carries no contact.
    pub async fn get_contact_by_id(&self, contact_id: &str) -> Result<Contact, ApiError> {
        let response: ContactInfoResponse = self
            .gateway
            .request(&Endpoint::ContactInfo(contact_id), RequestOptions::get())
            .await?;

        match response.contact {
            Some(contact) if response.success => Ok(contact),
            _ => Err(ApiError::Domain(CONTACT_FETCH_FAILED.to_string())),
        }
    }

    /// Store a new ZIP. The value is trimmed but not validated here.
    pub async fn update_contact_zip(
        &self,
        contact_id: &str,
        zip: &str,
    ) -> Result<UpdateZipResponse, ApiError> {
        let body = UpdateZipRequest {
            zip: zip.trim().to_string(),
        };
        self.gateway
            .request(&Endpoint::UpdateZip(contact_id), RequestOptions::post_json(&body)?)
            .await
    }

    /// Ask the server to re-derive the city from the ZIP it has stored. No
    /// ZIP is sent: the server's committed value is the one that counts.
    pub async fn update_contact_city(&self, contact_id: &str) -> Result<UpdateCityResponse, ApiError> {
        self.gateway
            .request(&Endpoint::UpdateCity(contact_id), RequestOptions::get())
            .await
    }

    /// Validate `zip`, store it, then have the server derive the city.
    pub async fn update_location(
        &self,
        contact_id: &str,
        zip: &str,
    ) -> Result<LocationUpdate, ApiError> {
        let zip = zip.trim();
        if zip.is_empty() {
            return Err(ApiError::Validation(ZIP_REQUIRED.to_string()));
        }
        if !validate_zip_code(zip) {
            return Err(ApiError::Validation(ZIP_INVALID.to_string()));
        }

        let zip_result = self.update_contact_zip(contact_id, zip).await?;
        if !zip_result.success {
            warn!(contact_id, message = %zip_result.message, "ZIP update rejected");
            return Ok(LocationUpdate::ZipRejected {
                message: zip_result.message,
            });
        }

        let city_result = self.update_contact_city(contact_id).await?;
        if !city_result.success {
            warn!(contact_id, zip, message = %city_result.message, "ZIP stored but city update failed");
            return Ok(LocationUpdate::CityFailed {
                zip: zip.to_string(),
                message: city_result.message,
            });
        }

        info!(contact_id, zip, city = %city_result.city, "location updated");
        let zip = if city_result.zip.is_empty() {
            zip.to_string()
        } else {
            city_result.zip
        };
        Ok(LocationUpdate::Updated {
            zip,
            city: city_result.city,
            message: city_result.message,
        })
    }
}
