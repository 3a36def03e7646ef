//! Game-server status monitor.
//!
//! Polls the status API (falling back to a status page) and announces transitions. The
//! first observation after start is only recorded. State is kept in memory.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::server::{
    error::AppError,
    model::{
        notification::{EmbedSpec, Notification},
        status::{ServerStatus, StatusApiDto, StatusPageDto},
    },
    service::dispatcher::MessageSink,
};

/// Status endpoints.
#[derive(Debug, Clone)]
pub struct StatusSettings {
    /// Base of the primary API; `/status` is appended.
    pub api_url: String,
    /// Bearer token of the primary API.
    pub token: String,
    /// Full URL of a status-page document used when the primary fails.
    pub fallback_url: Option<String>,
    pub channel_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// A check was already running.
    Skipped,
    /// Neither endpoint answered.
    Unavailable,
    /// First observation; recorded without announcing.
    Recorded(ServerStatus),
    Unchanged(ServerStatus),
    /// Status changed and an announcement was attempted.
    Changed {
        from: ServerStatus,
        to: ServerStatus,
        announced: bool,
    },
}

pub struct StatusMonitor {
    http: reqwest::Client,
    settings: StatusSettings,
    sink: Arc<dyn MessageSink>,
    /// Last observed status; the lock doubles as the overlap guard.
    last: Mutex<Option<ServerStatus>>,
}

impl StatusMonitor {
    /// Creates a new StatusMonitor.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client
    /// - `settings` - Endpoints, token and announcement channel
    /// - `sink` - Messaging client used for announcements
    pub fn new(
        http: reqwest::Client,
        settings: StatusSettings,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            http,
            settings,
            sink,
            last: Mutex::new(None),
        }
    }

    /// Queries the primary status API, then the fallback.
    ///
    /// # Returns
    /// - `Ok(ServerStatus)` - Status from whichever endpoint answered
    /// - `Err(AppError)` - Both failed; the fallback's error, or the primary's when no
    ///   fallback is configured
    pub async fn check(&self) -> Result<ServerStatus, AppError> {
        let primary_error = match self.check_primary().await {
            Ok(status) => return Ok(status),
            Err(e) => e,
        };

        let Some(fallback_url) = &self.settings.fallback_url else {
            return Err(primary_error);
        };

        tracing::warn!(
            "Primary status API failed: {}. Trying status page",
            primary_error
        );

        let page: StatusPageDto = self.get_json(fallback_url, None).await?;
        Ok(page.server_status())
    }

    async fn check_primary(&self) -> Result<ServerStatus, AppError> {
        let url = format!("{}/status", self.settings.api_url.trim_end_matches('/'));
        let dto: StatusApiDto = self.get_json(&url, Some(&self.settings.token)).await?;
        Ok(ServerStatus::from_online(dto.online))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, AppError> {
        let mut request = self.http.get(url).timeout(Duration::from_secs(15));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Checks the status and announces a change.
    pub async fn poll(&self) -> StatusOutcome {
        let Ok(mut last) = self.last.try_lock() else {
            tracing::warn!("Previous status check still running, skipping");
            return StatusOutcome::Skipped;
        };

        let current = match self.check().await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("Failed to fetch server status: {}", e);
                return StatusOutcome::Unavailable;
            }
        };

        let outcome = match *last {
            None => {
                tracing::info!("Initial server status: {}", current);
                StatusOutcome::Recorded(current)
            }
            Some(previous) if previous == current => StatusOutcome::Unchanged(current),
            Some(previous) => {
                tracing::info!("Server status changed: {} → {}", previous, current);
                StatusOutcome::Changed {
                    from: previous,
                    to: current,
                    announced: self.announce(current).await,
                }
            }
        };
        *last = Some(current);

        outcome
    }

    async fn announce(&self, status: ServerStatus) -> bool {
        let notification = status_notification(status);
        let channel_id = self.settings.channel_id;

        let send = async {
            self.sink.ensure_writable(channel_id).await?;
            self.sink.send(channel_id, &notification).await
        };

        match tokio::time::timeout(Duration::from_secs(15), send).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::error!("Failed to announce server status: {}", e);
                false
            }
            Err(_) => {
                tracing::error!("Timed out announcing server status");
                false
            }
        }
    }
}

/// Announcement embed for a status change.
pub fn status_notification(status: ServerStatus) -> Notification {
    let (title, color) = match status {
        ServerStatus::Online => ("🟢 Servers are back online", 0x2ecc71),
        ServerStatus::Offline => ("🔴 Servers are offline", 0xe74c3c),
    };

    Notification::embed(EmbedSpec {
        title: title.to_string(),
        color,
        timestamp: Some(chrono::Utc::now()),
        ..Default::default()
    })
}
