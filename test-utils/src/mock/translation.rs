//! Translation service mocks.

use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mounts `POST /detect` answering `language` for any text.
pub async fn mount_detect(server: &MockServer, language: &str) {
    Mock::given(method("POST"))
        .and(path("/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "language": language, "confidence": 90.0 }
        ])))
        .mount(server)
        .await;
}

/// Mounts `POST /translate` for the given language pair.
///
/// # Arguments
/// - `server` - Mock server to mount on
/// - `source` - Expected `source` field of the request
/// - `target` - Expected `target` field of the request
/// - `translated` - Text returned as `translatedText`
pub async fn mount_translate(server: &MockServer, source: &str, target: &str, translated: &str) {
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({
            "source": source,
            "target": target,
            "format": "text",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "translatedText": translated })),
        )
        .mount(server)
        .await;
}

/// Mounts `POST /translate` expecting it is never called.
pub async fn expect_no_translate(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
