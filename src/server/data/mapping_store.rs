//! Id-keyed change-detection store.
//!
//! Used by the personal feed, where a mod is updated in place under a stable id and URL.
//! "New" is decided by comparing the fetched version and timestamp against the stored
//! entry rather than by set membership.

use std::{collections::BTreeMap, path::PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::{
    data::json_file::{read_json, records_from_values, write_json_atomic},
    error::AppError,
    model::record::Record,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredMods {
    Keyed(BTreeMap<String, serde_json::Value>),
    List(Vec<serde_json::Value>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMapping {
    #[serde(default)]
    mods: Option<StoredMods>,
    #[serde(default)]
    last_reset_date: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredMappingRef<'a> {
    mods: &'a BTreeMap<String, Record>,
    last_reset_date: DateTime<Utc>,
}

/// Persistent `id → last-seen Record` map of one feed.
#[derive(Debug)]
pub struct MappingStore {
    path: PathBuf,
    cap: usize,
    entries: BTreeMap<String, Record>,
    last_reset: DateTime<Utc>,
}

impl MappingStore {
    /// Creates an empty store that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            path: path.into(),
            cap,
            entries: BTreeMap::new(),
            last_reset: Utc::now(),
        }
    }

    /// Loads the store from disk, reinitializing it when the file is missing or corrupt.
    ///
    /// Accepts both the keyed layout (`{"mods": {id: record}}`) and the older list layout
    /// (`{"mods": [record, ...]}`). When a list contains the same identity more than once
    /// the entry with the latest timestamp wins.
    ///
    /// # Arguments
    /// - `path` - JSON file backing the store
    /// - `cap` - Maximum number of retained entries
    ///
    /// # Returns
    /// - `MappingStore` - Loaded or freshly initialized store
    pub fn load(path: impl Into<PathBuf>, cap: usize) -> Self {
        let mut store = Self::new(path, cap);
        let name = store.name();

        let stored = match read_json::<StoredMapping>(&store.path) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                tracing::warn!("{} not found, creating new", name);
                store.write_or_log();
                return store;
            }
            Err(e) => {
                tracing::warn!("{} is invalid, reinitializing empty: {}", name, e);
                store.write_or_log();
                return store;
            }
        };

        if let Some(last_reset) = stored.last_reset_date {
            store.last_reset = last_reset;
        }

        let records = match stored.mods {
            Some(StoredMods::Keyed(entries)) => {
                records_from_values(entries.into_values().collect(), &name)
            }
            Some(StoredMods::List(values)) => records_from_values(values, &name),
            None => Vec::new(),
        };

        for record in records {
            store.upsert_if_newer(record);
        }
        store.enforce_cap();

        tracing::info!("Loaded {} entries from {}", store.entries.len(), name);

        store
    }

    /// Display name of the backing file for log lines.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identity: &str) -> Option<&Record> {
        self.entries.get(identity)
    }

    /// Time of the last successful persist.
    pub fn last_reset(&self) -> DateTime<Utc> {
        self.last_reset
    }

    /// Stored records in ascending timestamp order.
    pub fn records(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.entries.values().collect();
        records.sort_by_key(|record| record.timestamp);
        records
    }

    /// Whether the fetched record is new or updated relative to the stored entry.
    ///
    /// New iff no entry exists for the identity, or the stored version differs, or the
    /// stored timestamp is strictly earlier than the fetched one.
    pub fn is_new(&self, record: &Record) -> bool {
        match self.entries.get(record.identity()) {
            None => true,
            Some(stored) => {
                stored.version != record.version || stored.timestamp < record.timestamp
            }
        }
    }

    /// Selects fetched records that are new or updated.
    ///
    /// When the batch contains the same identity twice only the first occurrence is
    /// considered.
    pub fn diff(&self, fetched: Vec<Record>) -> Vec<Record> {
        let mut seen = std::collections::HashSet::new();

        fetched
            .into_iter()
            .filter(|record| seen.insert(record.identity().to_string()) && self.is_new(record))
            .collect()
    }

    /// Stores records, replacing entries with the same identity, and applies the cap.
    ///
    /// # Returns
    /// - `Vec<Record>` - Entries evicted by the cap, oldest first
    pub fn merge(&mut self, records: Vec<Record>) -> Vec<Record> {
        for record in records {
            self.entries.insert(record.identity().to_string(), record);
        }

        self.enforce_cap()
    }

    /// Inserts a bootstrap seed when the store is empty.
    ///
    /// The seed marks the feed as initialized without being dispatched, so it is never
    /// announced on later runs.
    ///
    /// # Returns
    /// - `true` - Store was empty and the seed was inserted
    /// - `false` - Store already had entries; nothing changed
    pub fn seed(&mut self, record: Record) -> bool {
        if !self.entries.is_empty() {
            return false;
        }

        self.entries.insert(record.identity().to_string(), record);
        true
    }

    fn upsert_if_newer(&mut self, record: Record) {
        let keep_existing = self
            .entries
            .get(record.identity())
            .is_some_and(|stored| stored.timestamp >= record.timestamp);

        if !keep_existing {
            self.entries.insert(record.identity().to_string(), record);
        }
    }

    fn enforce_cap(&mut self) -> Vec<Record> {
        if self.entries.len() <= self.cap {
            return Vec::new();
        }

        let overflow = self.entries.len() - self.cap;
        let oldest: Vec<String> = self
            .records()
            .into_iter()
            .take(overflow)
            .map(|record| record.identity().to_string())
            .collect();

        oldest
            .iter()
            .filter_map(|identity| self.entries.remove(identity))
            .collect()
    }

    /// Writes the whole store to disk and advances `lastResetDate`.
    ///
    /// # Arguments
    /// - `checked_at` - Start time of the poll being committed
    ///
    /// # Returns
    /// - `Ok(())` - Store persisted
    /// - `Err(AppError)` - Write failed; in-memory contents and `lastResetDate` are kept
    pub fn persist(&mut self, checked_at: DateTime<Utc>) -> Result<(), AppError> {
        write_json_atomic(
            &self.path,
            &StoredMappingRef {
                mods: &self.entries,
                last_reset_date: checked_at,
            },
        )?;
        self.last_reset = checked_at;

        tracing::info!("Saved {} entries to {}", self.entries.len(), self.name());

        Ok(())
    }

    fn write_or_log(&self) {
        let result = write_json_atomic(
            &self.path,
            &StoredMappingRef {
                mods: &self.entries,
                last_reset_date: self.last_reset,
            },
        );

        if let Err(e) = result {
            tracing::error!("Failed to initialize {}: {}", self.name(), e);
        }
    }
}
