//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays queued outcomes in order and records every request it receives.
/// Running out of script is a transport failure, so an unexpected extra call
/// surfaces as an error rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, body.to_string());
    }

    pub fn push_raw(&self, status: u16, body: impl Into<String>) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_failure(&self, detail: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(TransportError(detail.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

/// Contact JSON in the backend's wire shape.
pub fn contact_json(
    id: &str,
    first: Option<&str>,
    last: Option<&str>,
    zip: Option<&str>,
    city: Option<&str>,
) -> Value {
    let mut properties = serde_json::json!({
        "createdate": "2024-01-05T10:00:00.000Z",
        "lastmodifieddate": "2024-02-01T08:30:00.000Z",
        "hs_object_id": id,
    });
    for (key, value) in [("firstname", first), ("lastname", last), ("zip", zip), ("city", city)] {
        if let Some(value) = value {
            properties[key] = Value::String(value.to_string());
        }
    }
    serde_json::json!({
        "id": id,
        "properties": properties,
        "createdAt": "2024-01-05T10:00:00.000Z",
        "updatedAt": "2024-02-01T08:30:00.000Z",
        "archived": false,
    })
}
