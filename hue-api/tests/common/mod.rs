//! Shared helpers for integration tests against a mocked bridge.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hue_api::{HttpClient, HttpClientConfig};

/// Identity payload served by the mocked `GET /api/config`.
pub fn probe_payload() -> serde_json::Value {
    json!({
        "name": "Philips hue",
        "datastoreversion": "126",
        "swversion": "1953188020",
        "apiversion": "1.53.0",
        "mac": "aa:bb:cc:dd:ee:ff",
        "bridgeid": "AABBCCDDEEFF",
        "factorynew": false,
        "modelid": "BSB002"
    })
}

/// Start a mock bridge that answers the identity probe.
pub async fn start_bridge() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(probe_payload()))
        .mount(&server)
        .await;
    server
}

/// HTTP client scoped to the mock server's `/api` root.
pub fn api_client(server: &MockServer) -> HttpClient {
    HttpClient::new(HttpClientConfig {
        base_url: Some(format!("{}/api", server.uri())),
        ..HttpClientConfig::default()
    })
    .expect("failed to build test client")
}

/// A localhost port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind");
    listener.local_addr().expect("no local addr").port()
}
