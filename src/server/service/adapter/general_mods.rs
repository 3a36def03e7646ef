//! Adapter for recently updated mods of the whole game.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::server::{
    model::record::Record,
    service::adapter::{
        admission::{admit, check_cutoff, log_rejection, parse_mod, record_from_mod},
        nexus::NexusClient,
        FetchAdapter, FetchContext,
    },
};

/// Fetches `latest_updated.json` and keeps mods updated inside the lookback window.
pub struct GeneralModsAdapter {
    client: Arc<NexusClient>,
    filter_nsfw: bool,
    lookback: Duration,
}

impl GeneralModsAdapter {
    /// Creates a new GeneralModsAdapter.
    ///
    /// # Arguments
    /// - `client` - Shared mod repository client
    /// - `filter_nsfw` - Exclude adult-flagged mods
    /// - `lookback` - How far back to accept updates when no later check exists
    pub fn new(client: Arc<NexusClient>, filter_nsfw: bool, lookback: Duration) -> Self {
        Self {
            client,
            filter_nsfw,
            lookback,
        }
    }

    /// Oldest update time still admitted.
    ///
    /// The later of `now - lookback` and the last persisted check, so a restart does not
    /// reach back further than the window and a long uptime does not re-scan it.
    pub fn cutoff(&self, context: FetchContext) -> DateTime<Utc> {
        let window_start = context.now - self.lookback;

        match context.last_checked {
            Some(last_checked) if last_checked > window_start => last_checked,
            _ => window_start,
        }
    }
}

#[serenity::async_trait]
impl FetchAdapter for GeneralModsAdapter {
    fn name(&self) -> &str {
        "general mods"
    }

    async fn fetch(&self, context: FetchContext) -> Vec<Record> {
        tracing::info!("Fetching mods from the mod repository...");

        let items = match self.client.latest_updated().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Error fetching mods from the mod repository: {}", e);
                return Vec::new();
            }
        };

        let cutoff = self.cutoff(context);

        items
            .into_iter()
            .filter_map(|value| {
                let dto = match parse_mod(value) {
                    Ok(dto) => dto,
                    Err(rejection) => {
                        log_rejection(self.name(), "item", &rejection);
                        return None;
                    }
                };

                let timestamp = admit(&dto, self.filter_nsfw)
                    .and_then(|timestamp| check_cutoff(timestamp, cutoff).map(|_| timestamp));

                match timestamp {
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
