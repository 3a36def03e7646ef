//! Ordered-list change-detection store.
//!
//! Holds previously seen records of one feed in ascending timestamp order. New records are
//! spliced into position rather than appended and re-sorted, and the list is truncated to a
//! fixed cap after every insert batch by dropping the oldest entries first.
//!
//! The insertion point is found by binary search. The splice itself is O(n), which is
//! acceptable at the configured caps.

use std::{
    collections::{BTreeMap, HashSet},
    path::PathBuf,
};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::server::{
    data::json_file::{read_json, records_from_values, write_json_atomic},
    error::AppError,
    model::record::{Record, DEFAULT_CATEGORY},
};

/// On-disk shape of an ordered store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedLayout {
    /// Bare JSON array of records (`mods.json`).
    Flat,
    /// Object mapping category name to an array of records (`sw_articles.json`).
    ByCategory,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredOrdered {
    Flat(Vec<serde_json::Value>),
    ByCategory(BTreeMap<String, Vec<serde_json::Value>>),
}

/// Persistent ascending-timestamp history of one feed.
#[derive(Debug)]
pub struct OrderedStore {
    path: PathBuf,
    layout: OrderedLayout,
    cap: usize,
    records: Vec<Record>,
    identities: HashSet<String>,
    last_checked: Option<DateTime<Utc>>,
}

impl OrderedStore {
    /// Creates an empty store that will persist to `path`.
    ///
    /// # Arguments
    /// - `path` - JSON file backing the store
    /// - `layout` - On-disk shape
    /// - `cap` - Maximum number of retained records
    pub fn new(path: impl Into<PathBuf>, layout: OrderedLayout, cap: usize) -> Self {
        Self {
            path: path.into(),
            layout,
            cap,
            records: Vec::new(),
            identities: HashSet::new(),
            last_checked: None,
        }
    }

    /// Loads the store from disk, reinitializing it when the file is missing or corrupt.
    ///
    /// Never fails: a missing file is created empty and a corrupt file is logged and
    /// replaced. Entries that fail validation are dropped individually. Loaded records are
    /// re-sorted and de-duplicated so a hand-edited file cannot break the ordering
    /// invariant, then the cap is applied.
    ///
    /// # Arguments
    /// - `path` - JSON file backing the store
    /// - `layout` - On-disk shape used when writing
    /// - `cap` - Maximum number of retained records
    ///
    /// # Returns
    /// - `OrderedStore` - Loaded or freshly initialized store
    pub fn load(path: impl Into<PathBuf>, layout: OrderedLayout, cap: usize) -> Self {
        let mut store = Self::new(path, layout, cap);
        let name = store.name();

        let values = match read_json::<StoredOrdered>(&store.path) {
            Ok(Some(StoredOrdered::Flat(values))) => records_from_values(values, &name),
            Ok(Some(StoredOrdered::ByCategory(groups))) => groups
                .into_iter()
                .flat_map(|(category, values)| {
                    records_from_values(values, &name)
                        .into_iter()
                        .map(move |mut record| {
                            if record.category == DEFAULT_CATEGORY {
                                record.category = category.clone();
                            }
                            record
                        })
                })
                .collect(),
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

        let mut records = values;
        records.sort_by_key(|record| record.timestamp);
        for record in records {
            if store.identities.insert(record.identity().to_string()) {
                store.records.push(record);
            }
        }
        store.enforce_cap();

        tracing::info!("Loaded {} records from {}", store.records.len(), name);

        store
    }

    /// Display name of the backing file for log lines.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Records in ascending timestamp order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Time of the last poll whose results were successfully persisted.
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    /// Whether a record with the same identity (id, else URL) is stored.
    pub fn contains(&self, identity: &str) -> bool {
        self.identities.contains(identity)
    }

    /// Selects the fetched records that are not yet stored.
    ///
    /// A record is new iff no stored record shares its identity. Duplicates within the
    /// fetched batch are collapsed to their first occurrence. The returned records keep
    /// fetch order; ordering for dispatch is the engine's concern.
    ///
    /// # Arguments
    /// - `fetched` - Records returned by the fetch adapter
    ///
    /// # Returns
    /// - `Vec<Record>` - Records never seen before by this store
    pub fn diff(&self, fetched: Vec<Record>) -> Vec<Record> {
        let mut seen = HashSet::new();

        fetched
            .into_iter()
            .filter(|record| {
                let identity = record.identity();
                !self.contains(identity) && seen.insert(identity.to_string())
            })
            .collect()
    }

    /// Inserts one record at its chronological position.
    ///
    /// Records sharing a timestamp with stored ones are placed after them, so ties keep
    /// arrival order. Records whose identity is already stored are ignored.
    ///
    /// # Returns
    /// - `true` - Record inserted
    /// - `false` - Identity already present
    pub fn insert(&mut self, record: Record) -> bool {
        if !self.identities.insert(record.identity().to_string()) {
            return false;
        }

        let position = self
            .records
            .partition_point(|stored| stored.timestamp <= record.timestamp);
        self.records.insert(position, record);

        true
    }

    /// Inserts a batch of records and applies the cap.
    ///
    /// # Arguments
    /// - `records` - Records to insert, in any order
    ///
    /// # Returns
    /// - `Vec<Record>` - Records evicted by the cap, oldest first
    pub fn merge(&mut self, records: Vec<Record>) -> Vec<Record> {
        for record in records {
            self.insert(record);
        }

        self.enforce_cap()
    }

    fn enforce_cap(&mut self) -> Vec<Record> {
        if self.records.len() <= self.cap {
            return Vec::new();
        }

        let overflow = self.records.len() - self.cap;
        let evicted: Vec<Record> = self.records.drain(..overflow).collect();
        for record in &evicted {
            self.identities.remove(record.identity());
        }

        evicted
    }

    /// Writes the whole store to disk and records the check time.
    ///
    /// `last_checked` only advances when the write succeeds.
    ///
    /// # Arguments
    /// - `checked_at` - Start time of the poll being committed
    ///
    /// # Returns
    /// - `Ok(())` - Store persisted
    /// - `Err(AppError)` - Write failed; in-memory contents are kept
    pub fn persist(&mut self, checked_at: DateTime<Utc>) -> Result<(), AppError> {
        self.write()?;
        self.last_checked = Some(checked_at);

        tracing::info!("Saved {} records to {}", self.records.len(), self.name());

        Ok(())
    }

    fn write(&self) -> Result<(), AppError> {
        match self.layout {
            OrderedLayout::Flat => write_json_atomic(&self.path, &self.records),
            OrderedLayout::ByCategory => {
                let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
                for record in &self.records {
                    groups
                        .entry(record.category.as_str())
                        .or_default()
                        .push(record);
                }
                write_json_atomic(&self.path, &groups)
            }
        }
    }

    fn write_or_log(&self) {
        if let Err(e) = self.write() {
            tracing::error!("Failed to initialize {}: {}", self.name(), e);
        }
    }
}
