//! Mod repository API mocks.

use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// API key the mocks require in the `apikey` header.
pub const TEST_API_KEY: &str = "test-api-key";

/// Mounts `GET /games/{domain}/mods/latest_updated.json` returning `mods`.
///
/// # Arguments
/// - `server` - Mock server to mount on
/// - `domain` - Game domain segment of the path
/// - `mods` - Mod objects, typically from `factory::nexus_mod`
pub async fn mount_latest_updated(server: &MockServer, domain: &str, mods: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/games/{}/mods/latest_updated.json", domain)))
        .and(header("apikey", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(mods))
        .mount(server)
        .await;
}

/// Mounts `GET /users/{author_id}/mods.json` returning `body` verbatim.
///
/// Pass a bare array or a `{"mods": [...]}` object to exercise both response shapes.
pub async fn mount_author_mods(server: &MockServer, author_id: u64, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/mods.json", author_id)))
        .and(header("apikey", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts `GET /games/{domain}/mods/{id}.json` for the mod's own `mod_id`.
///
/// # Panics
/// - If `nexus_mod` has no integer `mod_id` (indicates invalid test data)
pub async fn mount_mod(server: &MockServer, domain: &str, nexus_mod: serde_json::Value) {
    let mod_id = nexus_mod["mod_id"]
        .as_u64()
        .expect("Mod fixture must have an integer mod_id");

    Mock::given(method("GET"))
        .and(path(format!("/games/{}/mods/{}.json", domain, mod_id)))
        .and(header("apikey", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(nexus_mod))
        .mount(server)
        .await;
}

/// Mounts a failing response for `endpoint`.
///
/// # Arguments
/// - `server` - Mock server to mount on
/// - `endpoint` - Exact request path
/// - `status` - HTTP status to return
/// - `expected_calls` - Number of requests the test expects, verified when the server drops
pub async fn mount_failure(server: &MockServer, endpoint: &str, status: u16, expected_calls: u64) {
    Mock::given(path(endpoint.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}
