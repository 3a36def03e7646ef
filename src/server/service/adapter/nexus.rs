//! Mod repository API client.
//!
//! Thin wrapper over `reqwest` that knows the endpoint layout, authenticates with the
//! `apikey` header and applies the retry policy. Responses are returned as raw JSON values
//! so adapters can validate items one by one.

use std::time::Duration;

use crate::server::{
    error::AppError, model::nexus::NexusModListDto, service::adapter::retry::RetryPolicy,
};

/// Connection settings for the mod repository.
#[derive(Debug, Clone)]
pub struct NexusSettings {
    /// API base, e.g. `https://api.nexusmods.com/v1`.
    pub api_url: String,
    /// Public site base used to build mod page links.
    pub site_url: String,
    pub api_key: String,
    pub game_domain: String,
    /// Log full response bodies at debug level.
    pub debug: bool,
}

pub struct NexusClient {
    http: reqwest::Client,
    settings: NexusSettings,
    retry: RetryPolicy,
}

impl NexusClient {
    /// Creates a new NexusClient.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `settings` - Endpoint and credential settings
    /// - `retry` - Policy applied to every request
    pub fn new(http: reqwest::Client, settings: NexusSettings, retry: RetryPolicy) -> Self {
        Self {
            http,
            settings,
            retry,
        }
    }

    pub fn game_domain(&self) -> &str {
        &self.settings.game_domain
    }

    /// Public page of a mod.
    pub fn mod_url(&self, mod_id: u64) -> String {
        format!(
            "{}/{}/mods/{}",
            self.settings.site_url.trim_end_matches('/'),
            self.settings.game_domain,
            mod_id
        )
    }

    /// Recently updated mods of the configured game.
    ///
    /// # Returns
    /// - `Ok(Vec<Value>)` - Raw mod objects
    /// - `Err(AppError)` - Every attempt failed or the body was not an array
    pub async fn latest_updated(&self) -> Result<Vec<serde_json::Value>, AppError> {
        let url = self.api_endpoint(&format!(
            "games/{}/mods/latest_updated.json",
            self.settings.game_domain
        ));
        self.get_with_retry("latest updated mods", &url).await
    }

    /// Mods uploaded by an author.
    ///
    /// Accepts both the bare-array and the `{"mods": [...]}` response shapes.
    pub async fn author_mods(&self, author_id: u64) -> Result<Vec<serde_json::Value>, AppError> {
        let url = self.api_endpoint(&format!("users/{}/mods.json", author_id));
        let list: NexusModListDto = self.get_with_retry("author mods", &url).await?;
        Ok(list.into_items())
    }

    /// A single mod by id.
    pub async fn mod_by_id(&self, mod_id: u64) -> Result<serde_json::Value, AppError> {
        let url = self.api_endpoint(&format!(
            "games/{}/mods/{}.json",
            self.settings.game_domain, mod_id
        ));
        self.get_with_retry(&format!("mod {}", mod_id), &url).await
    }

    fn api_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.api_url.trim_end_matches('/'), path)
    }

    async fn get_with_retry<T: serde::de::DeserializeOwned>(
        &self,
        label: &str,
        url: &str,
    ) -> Result<T, AppError> {
        let body: serde_json::Value = self.retry.run(label, || self.get_json(url)).await?;

        if self.settings.debug {
            tracing::debug!("Full {} response: {}", label, body);
        }

        Ok(serde_json::from_value(body)?)
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .get(url)
            .header("apikey", &self.settings.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
