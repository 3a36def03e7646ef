use axum::{routing::get, Router};

pub const HEALTH_TEXT: &str = "Bot is running!";

/// Liveness endpoint for the hosting platform.
///
/// Answers regardless of gateway or feed state.
pub fn router() -> Router {
    Router::new().route("/", get(health))
}

async fn health() -> &'static str {
    HEALTH_TEXT
}
