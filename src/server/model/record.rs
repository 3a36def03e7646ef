//! Record domain model.
//!
//! A `Record` is the normalized representation of one externally observed item: a mod
//! release from the mod repository or an article from the news site. Fetch adapters
//! produce records, stores persist them and the dispatcher formats them. Identity is the
//! upstream id (falling back to the URL for legacy entries without one); ordering is the
//! upstream-reported timestamp.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned when the upstream item does not report one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Well-known keys of `Record::extra`.
pub mod extra_key {
    /// Preview image shown in rich embeds
    pub const IMAGE_URL: &str = "image_url";
    /// Upstream author display name
    pub const AUTHOR: &str = "author";
}

/// One externally observed item, normalized across feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier: upstream mod id, or the article URL.
    ///
    /// Older persisted entries may lack it, in which case `url` is used for identity.
    #[serde(default)]
    pub id: String,
    /// Display name.
    pub title: String,
    /// Canonical link.
    pub url: String,
    /// Upstream-reported update time.
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Version string, only reported for mods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Free-text classification.
    #[serde(default = "default_category")]
    pub category: String,
    /// Feed-specific metadata, opaque to the engine.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Record {
    /// Creates a record with the default category and no version or extras.
    ///
    /// # Arguments
    /// - `id` - Stable upstream identifier
    /// - `title` - Display name
    /// - `url` - Canonical link
    /// - `timestamp` - Upstream-reported update time
    ///
    /// # Returns
    /// - `Record` - New record ready for further customization
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            timestamp,
            version: None,
            category: default_category(),
            extra: BTreeMap::new(),
        }
    }

    /// Sets the version string.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version.filter(|v| !v.trim().is_empty());
        self
    }

    /// Sets the category, keeping the default when the given value is blank.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
            self.category = category;
        }
        self
    }

    /// Adds a feed-specific metadata entry when a value is present.
    pub fn with_extra(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.extra.insert(key.to_string(), value);
        }
        self
    }

    /// Key used for set-membership checks.
    ///
    /// Returns the id when present, otherwise the URL.
    pub fn identity(&self) -> &str {
        if self.id.is_empty() {
            &self.url
        } else {
            &self.id
        }
    }

    /// Preview image URL, if the upstream provided one.
    pub fn image_url(&self) -> Option<&str> {
        self.extra.get(extra_key::IMAGE_URL).map(String::as_str)
    }
}

/// Sorts records ascending by timestamp.
///
/// Uses a stable sort so records sharing a timestamp keep their fetch order.
pub fn sort_chronologically(records: &mut [Record]) {
    records.sort_by_key(|record| record.timestamp);
}
