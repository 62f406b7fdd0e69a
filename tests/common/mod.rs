//! Shared helpers for integration tests

#![allow(dead_code)]

use netpolicy_client::{ClientConfig, ControllerClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Client pointed at a mock controller
pub fn client_for(server: &MockServer) -> ControllerClient {
    ControllerClient::new(config_for(server)).expect("client should build")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    let addr = server.address();
    ClientConfig::new(&addr.ip().to_string()).with_port(addr.port())
}

/// Mount a list endpoint answering with `items`
pub async fn mount_list(server: &MockServer, collection: &str, items: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{}/", collection)))
        .respond_with(ResponseTemplate::new(200).set_body_json(items))
        .mount(server)
        .await;
}

/// Mount an empty list for every collection the object model consults
pub async fn mount_empty_lists(server: &MockServer) {
    mount_list(server, "tenants", json!([])).await;
    mount_list(server, "networks", json!([])).await;
}

/// Accept any POST and echo success
pub async fn accept_posts(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

/// Accept any DELETE
pub async fn accept_deletes(server: &MockServer) {
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Requests received with the given method, in arrival order
pub async fn requests_with_method(server: &MockServer, verb: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .collect()
}

/// Paths of the requests received with the given method, in arrival order
pub async fn paths_with_method(server: &MockServer, verb: &str) -> Vec<String> {
    requests_with_method(server, verb)
        .await
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}
