//! Fetch adapters.
//!
//! An adapter retrieves raw upstream data for one feed and normalizes it into `Record`s.
//! Adapters own everything upstream-specific: HTTP details, retry with backoff and the
//! admissibility filters. Their `fetch` never fails; once retries are exhausted the
//! failure is logged and an empty batch is returned, so the feed engine stays agnostic of
//! upstream flakiness.

pub mod admission;
pub mod articles;
pub mod general_mods;
pub mod nexus;
pub mod personal_mods;
pub mod retry;
pub mod scraper;

use chrono::{DateTime, Utc};

use crate::server::model::record::Record;

/// Inputs an adapter may use to bound its fetch window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchContext {
    /// Start time of the last poll whose results were persisted, if any.
    pub last_checked: Option<DateTime<Utc>>,
    /// Start time of the current poll.
    pub now: DateTime<Utc>,
}

/// Source of records for one feed.
#[serenity::async_trait]
pub trait FetchAdapter: Send + Sync {
    /// Short feed name used in log lines.
    fn name(&self) -> &str;

    /// Fetches admissible records, in upstream order.
    ///
    /// Never fails: transient failures are retried internally and exhausted retries
    /// produce an empty batch.
    async fn fetch(&self, context: FetchContext) -> Vec<Record>;
}
