//! Integration tests for the HTTP client wrapper against a mocked bridge.
//!
//! Covers status classification, body decoding by content type, form
//! encoding on the wire, and header refresh.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hue_api::http::{self, HttpClientConfig, RequestConfig, StatusPolicy};
use hue_api::HttpClient;
use hue_core::body::ResponseData;
use hue_core::error::HueError;

// ---- Status classification ----

#[tokio::test]
async fn not_found_becomes_http_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lights"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let client = common::api_client(&server);
    let err = client.request(RequestConfig::get("lights").json()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains(r#"{"error":"not found"}"#), "message was {err}");

    let HueError::Http(http_err) = err else {
        panic!("expected an HTTP status error");
    };
    assert!(http_err.url().ends_with("/api/lights"));
    assert!(http_err.headers().is_some());
    assert_eq!(
        http_err.data(),
        Some(&ResponseData::Json(json!({"error": "not found"})))
    );
}

#[tokio::test]
async fn custom_status_policy_accepts_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let client = common::api_client(&server);
    let res = client
        .request(RequestConfig::get("/missing").validate_status(StatusPolicy::Range(200..=499)))
        .await
        .unwrap();

    assert_eq!(res.status, 404);
    assert_eq!(res.data.as_text(), Some("gone"));
}

#[tokio::test]
async fn server_error_without_body_has_bare_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = common::api_client(&server);
    let err = client.request(RequestConfig::delete("scenes/1")).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error status: 503");
}

#[tokio::test]
async fn connection_refused_is_surfaced_as_request_error() {
    let port = common::closed_port();
    let err = http::request(RequestConfig::get(format!("http://127.0.0.1:{port}/api/config")))
        .await
        .unwrap_err();

    assert!(matches!(err, HueError::Request(_)), "got {err:?}");
}

// ---- Body decoding ----

#[tokio::test]
async fn empty_json_body_is_returned_as_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/user/lights/1/state"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "application/json"))
        .mount(&server)
        .await;

    let client = common::api_client(&server);
    let res = client
        .request(RequestConfig::put("user/lights/1/state").json().data(json!({"on": true})))
        .await
        .unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.data, ResponseData::Text(String::new()));
}

#[tokio::test]
async fn json_body_is_parsed() {
    let server = common::start_bridge().await;

    let res = http::request(RequestConfig::get(format!("{}/api/config", server.uri())).json())
        .await
        .unwrap();

    assert_eq!(res.status, 200);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.data.as_json().unwrap()["modelid"], "BSB002");
}

// ---- Request encoding on the wire ----

#[tokio::test]
async fn json_data_is_sent_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/groups"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"name": "Kitchen", "lights": ["1", "2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"success": {"id": "3"}}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::api_client(&server);
    let res = client
        .request(
            RequestConfig::post("user/groups")
                .json()
                .data(json!({"name": "Kitchen", "lights": ["1", "2"]})),
        )
        .await
        .unwrap();

    assert_eq!(res.data.as_json().unwrap()[0]["success"]["id"], "3");
}

#[tokio::test]
async fn params_are_sent_form_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/refresh"))
        .and(header("content-type", "application/x-www-form-urlencoded; charset=UTF-8"))
        .and(body_string("grant_type=refresh_token&refresh_token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(HttpClientConfig {
        base_url: Some(server.uri()),
        ..HttpClientConfig::default()
    })
    .unwrap();
    let res = client
        .request(
            RequestConfig::post("oauth2/refresh")
                .json()
                .data(json!({"dropped": true}))
                .params([("grant_type", "refresh_token"), ("refresh_token", "abc")]),
        )
        .await
        .unwrap();

    assert_eq!(res.data.as_json().unwrap()["access_token"], "t");
}

#[tokio::test]
async fn refreshed_token_is_sent_on_later_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/lights"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::api_client(&server);
    client.refresh_authorization_header("fresh-token").await.unwrap();

    let res = client.request(RequestConfig::get("lights").json()).await.unwrap();
    assert_eq!(res.data, ResponseData::Json(json!({})));
}
