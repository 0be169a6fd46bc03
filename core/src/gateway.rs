//! Request gateway: the single path every network call takes.
//!
//! # Design
//! `RequestGateway` holds the base address and a `Transport`. Each call is
//! split the same way: `build_request` produces an `HttpRequest`, the
//! transport executes it, and `handle_response` turns the `HttpResponse` into
//! a typed value or an `ApiError`. Build and handle are pure, so they are
//! tested directly; only `request` touches the transport.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use crate::transport::ReqwestTransport;
use crate::types::ApiErrorBody;

const CONTENT_TYPE: &str = "Content-Type";
const JSON: &str = "application/json";

/// Per-call method, extra headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// Merged over the defaults; a header named here replaces the default
    /// of the same name.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(Self {
            method: HttpMethod::Post,
            headers: Vec::new(),
            body: Some(body),
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct RequestGateway<T> {
    base_url: String,
    transport: T,
}

impl RequestGateway<ReqwestTransport> {
    /// Gateway over a reqwest client built from `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(&config.base_url, transport))
    }
}

impl<T: Transport> RequestGateway<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Compose the absolute URL and merge headers for one call.
    pub fn build_request(&self, endpoint: &Endpoint<'_>, options: RequestOptions) -> HttpRequest {
        let mut headers = vec![(CONTENT_TYPE.to_string(), JSON.to_string())];
        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        HttpRequest {
            method: options.method,
            path: format!("{}{}", self.base_url, endpoint.path()),
            headers,
            body: options.body,
        }
    }

    /// Map a response to the declared result type or a structured error.
    pub fn handle_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        if !response.is_success() {
            return Err(status_error(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Build, execute and handle one call.
    pub async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<'_>,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        let request = self.build_request(endpoint, options);
        debug!(method = request.method.as_str(), url = %request.path, "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, endpoint = %endpoint.path(), "transport failure");
                return Err(ApiError::Transport { detail: e.0 });
            }
        };

        let status = response.status;
        self.handle_response(response).inspect_err(|e| {
            warn!(status, error = %e, endpoint = %endpoint.path(), "request failed");
        })
    }
}

fn status_error(response: &HttpResponse) -> ApiError {
    let body: Value =
        serde_json::from_str(&response.body).unwrap_or_else(|_| Value::Object(Map::new()));
    let message = serde_json::from_value::<ApiErrorBody>(body.clone())
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP Error: {}", response.status));

    ApiError::HttpStatus {
        message,
        status: response.status,
        body,
    }
}
