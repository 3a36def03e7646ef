//! Adapter for the configured author's own mods.
//!
//! Reads the author listing and keeps mods uploaded by the author plus an explicit
//! whitelist of mod ids the author maintains under someone else's upload. When the
//! listing is unavailable the whitelisted mods are fetched one by one instead.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::server::{
    model::{nexus::NexusModDto, record::Record},
    service::adapter::{
        admission::{admit, check_cutoff, log_rejection, parse_mod, record_from_mod, Rejection},
        nexus::NexusClient,
        FetchAdapter, FetchContext,
    },
};

pub struct PersonalModsAdapter {
    client: Arc<NexusClient>,
    author_id: u64,
    whitelist: Vec<u64>,
    filter_nsfw: bool,
    cutoff: DateTime<Utc>,
}

impl PersonalModsAdapter {
    /// Creates a new PersonalModsAdapter.
    ///
    /// # Arguments
    /// - `client` - Shared mod repository client
    /// - `author_id` - Uploader id whose mods are announced
    /// - `whitelist` - Mod ids announced regardless of uploader
    /// - `filter_nsfw` - Exclude adult-flagged mods
    /// - `cutoff` - Fixed first-run cutoff; older mods are never announced
    pub fn new(
        client: Arc<NexusClient>,
        author_id: u64,
        whitelist: Vec<u64>,
        filter_nsfw: bool,
        cutoff: DateTime<Utc>,
    ) -> Self {
        Self {
            client,
            author_id,
            whitelist,
            filter_nsfw,
            cutoff,
        }
    }

    async fn fetch_items(&self) -> Vec<serde_json::Value> {
        match self.client.author_mods(self.author_id).await {
            Ok(items) => {
                tracing::info!("Fetched {} mods from the author endpoint", items.len());
                return items;
            }
            Err(e) => tracing::error!(
                "Error fetching personal mods for author {}: {}",
                self.author_id,
                e
            ),
        }

        let mut items = Vec::new();
        for mod_id in &self.whitelist {
            tracing::info!("Attempting fallback: fetching mod {}", mod_id);
            match self.client.mod_by_id(*mod_id).await {
                Ok(item) => items.push(item),
                Err(e) => tracing::error!("Fallback fetch for mod {} failed: {}", mod_id, e),
            }
        }

        items
    }

    fn admit_personal(&self, dto: &NexusModDto) -> Result<DateTime<Utc>, Rejection> {
        let timestamp = admit(dto, self.filter_nsfw)?;

        if !self.whitelist.contains(&dto.mod_id) && dto.uploader_id() != Some(self.author_id) {
            return Err(Rejection::ForeignAuthor);
        }

        check_cutoff(timestamp, self.cutoff)?;

        Ok(timestamp)
    }
}

#[serenity::async_trait]
impl FetchAdapter for PersonalModsAdapter {
    fn name(&self) -> &str {
        "personal mods"
    }

    async fn fetch(&self, _context: FetchContext) -> Vec<Record> {
        tracing::info!("Fetching personal mods for author {}...", self.author_id);

        self.fetch_items()
            .await
            .into_iter()
            .filter_map(|value| {
                let dto = match parse_mod(value) {
                    Ok(dto) => dto,
                    Err(rejection) => {
                        log_rejection(self.name(), "item", &rejection);
                        return None;
                    }
                };

                match self.admit_personal(&dto) {
                    Ok(timestamp) => {
                        let url = self.client.mod_url(dto.mod_id);
                        Some(record_from_mod(dto, url, timestamp))
                    }
                    Err(rejection) => {
                        log_rejection(self.name(), dto.display_name(), &rejection);
                        None
                    }
                }
            })
            .collect()
    }
}
