//! Factory for mod repository API objects.
//!
//! Builds JSON objects shaped like the entries of `latest_updated.json`, the author
//! listing and single-mod responses. Defaults describe a published, available, safe mod
//! with an update timestamp, so tests only override what they exercise.

use crate::factory::helpers::next_id;

/// Factory for creating mod API objects with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::nexus_mod::NexusModFactory;
///
/// let value = NexusModFactory::new()
///     .mod_id(11814)
///     .name("Poofies")
///     .author_id(42)
///     .version("1.2")
///     .build();
/// ```
pub struct NexusModFactory {
    mod_id: u64,
    name: Option<String>,
    status: String,
    available: bool,
    adult: bool,
    category_name: Option<String>,
    version: Option<String>,
    updated_timestamp: Option<serde_json::Value>,
    created_timestamp: Option<serde_json::Value>,
    picture_url: Option<String>,
    author_id: Option<serde_json::Value>,
}

impl NexusModFactory {
    /// Creates a new NexusModFactory with default values.
    ///
    /// Defaults:
    /// - mod_id: auto-incremented
    /// - name: `"Mod {id}"`
    /// - status: `"published"`, available, not adult
    /// - category_name: `"Gameplay"`
    /// - updated_timestamp: 2025-01-01T00:00:00Z
    ///
    /// # Returns
    /// - `NexusModFactory` - New factory instance with defaults
    pub fn new() -> Self {
        let id = next_id();
        Self {
            mod_id: id,
            name: Some(format!("Mod {}", id)),
            status: "published".to_string(),
            available: true,
            adult: false,
            category_name: Some("Gameplay".to_string()),
            version: None,
            updated_timestamp: Some(serde_json::json!(1_735_689_600)),
            created_timestamp: None,
            picture_url: None,
            author_id: None,
        }
    }

    pub fn mod_id(mut self, mod_id: u64) -> Self {
        self.mod_id = mod_id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Removes the name so the consumer's fallback applies.
    pub fn unnamed(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn adult(mut self, adult: bool) -> Self {
        self.adult = adult;
        self
    }

    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category_name = category.map(str::to_string);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the update time in unix seconds.
    pub fn updated_at(mut self, seconds: i64) -> Self {
        self.updated_timestamp = Some(serde_json::json!(seconds));
        self
    }

    /// Sets the creation time in unix seconds.
    pub fn created_at(mut self, seconds: i64) -> Self {
        self.created_timestamp = Some(serde_json::json!(seconds));
        self
    }

    /// Removes both timestamps.
    pub fn without_timestamps(mut self) -> Self {
        self.updated_timestamp = None;
        self.created_timestamp = None;
        self
    }

    pub fn picture_url(mut self, url: impl Into<String>) -> Self {
        self.picture_url = Some(url.into());
        self
    }

    /// Sets the uploader id as a JSON integer.
    pub fn author_id(mut self, author_id: u64) -> Self {
        self.author_id = Some(serde_json::json!(author_id));
        self
    }

    /// Sets the uploader id to an arbitrary JSON value, e.g. a string.
    pub fn raw_author_id(mut self, author_id: serde_json::Value) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Builds the JSON object.
    ///
    /// # Returns
    /// - `serde_json::Value` - Mod object as the upstream would return it
    pub fn build(self) -> serde_json::Value {
        let mut value = serde_json::json!({
            "mod_id": self.mod_id,
            "status": self.status,
            "available": self.available,
            "contains_adult_content": self.adult,
        });

        let object = value
            .as_object_mut()
            .expect("Factory value is always an object");

        if let Some(name) = self.name {
            object.insert("name".into(), serde_json::json!(name));
        }
        if let Some(category) = self.category_name {
            object.insert("category_name".into(), serde_json::json!(category));
        }
        if let Some(version) = self.version {
            object.insert("version".into(), serde_json::json!(version));
        }
        if let Some(updated) = self.updated_timestamp {
            object.insert("updated_timestamp".into(), updated);
        }
        if let Some(created) = self.created_timestamp {
            object.insert("created_timestamp".into(), created);
        }
        if let Some(picture) = self.picture_url {
            object.insert("picture_url".into(), serde_json::json!(picture));
        }
        if let Some(author_id) = self.author_id {
            object.insert(
                "user".into(),
                serde_json::json!({ "user_id": author_id, "name": "Author" }),
            );
        }

        value
    }
}

impl Default for NexusModFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a published mod with the given id and update time.
///
/// # Arguments
/// - `mod_id` - Upstream mod id
/// - `updated_at` - Update time in unix seconds
///
/// # Returns
/// - `serde_json::Value` - Mod object with defaults for every other field
pub fn create_nexus_mod(mod_id: u64, updated_at: i64) -> serde_json::Value {
    NexusModFactory::new()
        .mod_id(mod_id)
        .updated_at(updated_at)
        .build()
}
