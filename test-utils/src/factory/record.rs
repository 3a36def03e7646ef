//! Factory for records as persisted in the feed stores.

use crate::factory::helpers::next_id;

/// Factory for stored record documents.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::record::RecordFactory;
///
/// let value = RecordFactory::new()
///     .id("A")
///     .url("u1")
///     .date("2025-01-01T00:00:00Z")
///     .build();
/// ```
pub struct RecordFactory {
    id: Option<String>,
    title: String,
    url: String,
    date: String,
    version: Option<String>,
    category: Option<String>,
}

impl RecordFactory {
    /// Creates a new RecordFactory with default values.
    ///
    /// Defaults:
    /// - id: auto-incremented
    /// - title: `"Record {id}"`
    /// - url: `"https://example.com/records/{id}"`
    /// - date: `"2025-01-01T00:00:00Z"`
    pub fn new() -> Self {
        let id = next_id();
        Self {
            id: Some(id.to_string()),
            title: format!("Record {}", id),
            url: format!("https://example.com/records/{}", id),
            date: "2025-01-01T00:00:00Z".to_string(),
            version: None,
            category: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Omits the id, as older store files did.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the raw date string; invalid values are allowed on purpose.
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builds the JSON object.
    pub fn build(self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "title": self.title,
            "url": self.url,
            "date": self.date,
        });

        let object = value
            .as_object_mut()
            .expect("Factory value is always an object");

        if let Some(id) = self.id {
            object.insert("id".into(), serde_json::json!(id));
        }
        if let Some(version) = self.version {
            object.insert("version".into(), serde_json::json!(version));
        }
        if let Some(category) = self.category {
            object.insert("category".into(), serde_json::json!(category));
        }

        value
    }
}

impl Default for RecordFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a stored record with the given id and date.
///
/// The URL is derived from the id so identity checks stay consistent.
pub fn create_record(id: &str, date: &str) -> serde_json::Value {
    RecordFactory::new()
        .id(id)
        .title(id)
        .url(format!("https://example.com/records/{}", id))
        .date(date)
        .build()
}
