//! Typed async client for a CRM contacts backend.
//!
//! # Overview
//! Lists contacts, fetches one contact, and updates a contact's location in
//! two steps: store a new ZIP, then let the server derive the city from it.
//!
//! # Design
//! - `RequestGateway` is the only path to the network. It builds plain-data
//!   `HttpRequest`s, executes them through a `Transport`, and maps every
//!   failure into one `ApiError`.
//! - `ContactService` is stateless on top of the gateway and owns the
//!   ZIP-then-city sequencing. A city failure after a committed ZIP comes back
//!   as `LocationUpdate::CityFailed`, not as an error.
//! - Held contacts are never patched. After any location update the caller
//!   re-fetches; `ContactManager` does this automatically.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod config;
pub mod display;
pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod http;
pub mod manager;
pub mod service;
pub mod transport;
pub mod types;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, GatewayConfig};
pub use display::{
    contact_display_name, contact_initials, format_date, has_complete_location_data,
    validate_zip_code,
};
pub use endpoints::Endpoint;
pub use error::ApiError;
pub use gateway::{RequestGateway, RequestOptions};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use manager::ContactManager;
pub use service::{ContactService, DEFAULT_LIST_LIMIT};
pub use transport::ReqwestTransport;
pub use types::{
    ApiErrorBody, Contact, ContactInfoResponse, ContactProperties, ListContactsResponse,
    UpdateCityResponse, UpdateZipRequest, UpdateZipResponse,
};
pub use update::LocationUpdate;
