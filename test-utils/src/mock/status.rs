//! Game server status mocks.

use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Bearer token the primary status mock requires.
pub const TEST_STATUS_TOKEN: &str = "test-status-token";

/// Mounts `GET /status` returning `{"online": online}`.
pub async fn mount_status(server: &MockServer, online: bool) {
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header(
            "authorization",
            format!("Bearer {}", TEST_STATUS_TOKEN).as_str(),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "online": online })),
        )
        .mount(server)
        .await;
}

/// Mounts a status-page document at `page_path` with the given indicator.
///
/// `"none"` means all systems operational.
pub async fn mount_status_page(server: &MockServer, page_path: &str, indicator: &str) {
    Mock::given(method("GET"))
        .and(path(page_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": { "indicator": indicator, "description": "Test status" }
        })))
        .mount(server)
        .await;
}
