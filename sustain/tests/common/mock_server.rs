#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use sustain::SustainClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct SustainMock {
    pub server: MockServer,
}

impl SustainMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn client(&self) -> Arc<SustainClient> {
        Arc::new(SustainClient::new().with_base_url(format!("{}/api/", self.server.uri())))
    }

    /// Mounts a JSON response for the given method and path.
    /// Paths are absolute, e.g. `/api/activities`.
    pub async fn mount_json(&self, http_method: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mounts an empty response, for endpoints like DELETE that return 204.
    pub async fn mount_empty(&self, http_method: &str, route: &str, status: u16) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the mock backend has received so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

pub fn user_json(id: i64, username: &str, email: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": email,
        "created_at": "2025-01-10T08:00:00Z",
    })
}

pub fn activity_json(id: i64, category: &str, action: &str, value: f64, unit: &str) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "category": category,
        "action": action,
        "value": value,
        "unit": unit,
        "notes": null,
        "date": "2025-08-20T10:00:00Z",
    })
}
