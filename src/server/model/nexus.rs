//! Mod repository API payloads.
//!
//! Mirrors the subset of the mod repository's JSON responses the bot consumes. All fields
//! are optional or defaulted because the upstream omits them freely; admissibility is
//! decided by the fetch adapters, not by deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::server::util::parse::unix_seconds_to_utc;

/// One mod as returned by `latest_updated.json`, `mods/{id}.json` or the author listing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NexusModDto {
    /// Upstream mod id, unique within the game domain.
    pub mod_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// Publication status, `"published"` for visible mods.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub contains_adult_content: bool,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Unix seconds of the last update, as a number or numeric string.
    #[serde(default)]
    pub updated_timestamp: Option<serde_json::Value>,
    /// Unix seconds of the initial upload, used when no update time is reported.
    #[serde(default)]
    pub created_timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub user: Option<NexusUserDto>,
}

/// Uploader information attached to a mod.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NexusUserDto {
    /// Kept raw: only a JSON integer counts as an uploader id.
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NexusModDto {
    /// Display name with the upstream's fallback for unnamed mods.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed Mod")
    }

    /// Whether the mod is published and currently downloadable.
    pub fn is_published(&self) -> bool {
        self.status.as_deref() == Some("published") && self.available
    }

    /// Update time, falling back to creation time.
    ///
    /// # Returns
    /// - `Some(DateTime<Utc>)` - First of updated/created that is a valid positive timestamp
    /// - `None` - Neither field yields a valid instant
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let parse = |value: &Option<serde_json::Value>| {
            value
                .as_ref()
                .and_then(|value| match value {
                    serde_json::Value::Number(n) => n.as_i64(),
                    serde_json::Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                })
                .and_then(unix_seconds_to_utc)
        };

        parse(&self.updated_timestamp).or_else(|| parse(&self.created_timestamp))
    }

    /// Uploader id, if the upstream reported it as an integer.
    ///
    /// A string id such as `"42"` yields `None`, so author matching stays integer equality.
    pub fn uploader_id(&self) -> Option<u64> {
        self.user
            .as_ref()
            .and_then(|user| user.user_id.as_ref())
            .and_then(serde_json::Value::as_u64)
    }
}

/// Response shape of the author listing endpoint.
///
/// The endpoint has been observed returning both a bare array and an object wrapping it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NexusModListDto {
    Bare(Vec<serde_json::Value>),
    Wrapped {
        #[serde(default)]
        mods: Vec<serde_json::Value>,
    },
}

impl NexusModListDto {
    pub fn into_items(self) -> Vec<serde_json::Value> {
        match self {
            Self::Bare(items) => items,
            Self::Wrapped { mods } => mods,
        }
    }
}
