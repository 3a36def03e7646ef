//! Change-detection store of one feed.
//!
//! Feeds persist either as an ordered list (general mods, articles) or as an id-keyed
//! mapping (personal mods). `FeedStore` gives the feed engine one interface over both.

use chrono::{DateTime, Utc};

use crate::server::{
    data::{mapping_store::MappingStore, ordered_store::OrderedStore},
    error::AppError,
    model::record::Record,
};

#[derive(Debug)]
pub enum FeedStore {
    Ordered(OrderedStore),
    Mapping(MappingStore),
}

impl FeedStore {
    /// Records from `fetched` that this store has not seen, in fetch order.
    pub fn diff(&self, fetched: Vec<Record>) -> Vec<Record> {
        match self {
            Self::Ordered(store) => store.diff(fetched),
            Self::Mapping(store) => store.diff(fetched),
        }
    }

    /// Merges new records and applies the cap, returning evicted records.
    pub fn merge(&mut self, records: Vec<Record>) -> Vec<Record> {
        match self {
            Self::Ordered(store) => store.merge(records),
            Self::Mapping(store) => store.merge(records),
        }
    }

    /// Writes the store to disk, advancing its check time on success.
    pub fn persist(&mut self, checked_at: DateTime<Utc>) -> Result<(), AppError> {
        match self {
            Self::Ordered(store) => store.persist(checked_at),
            Self::Mapping(store) => store.persist(checked_at),
        }
    }

    /// Time of the last successfully persisted poll.
    ///
    /// Ordered stores start without one after a restart; mapping stores carry their
    /// persisted `lastResetDate`.
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Ordered(store) => store.last_checked(),
            Self::Mapping(store) => Some(store.last_reset()),
        }
    }

    /// Inserts a bootstrap seed into an empty store, without dispatching it.
    ///
    /// # Returns
    /// - `true` - Store was empty and now holds the seed
    /// - `false` - Store already had records
    pub fn seed(&mut self, record: Record) -> bool {
        match self {
            Self::Ordered(store) => store.is_empty() && store.insert(record),
            Self::Mapping(store) => store.seed(record),
        }
    }

    /// Stored records in ascending timestamp order.
    pub fn records(&self) -> Vec<Record> {
        match self {
            Self::Ordered(store) => store.records().to_vec(),
            Self::Mapping(store) => store.records().into_iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Ordered(store) => store.len(),
            Self::Mapping(store) => store.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self) -> String {
        match self {
            Self::Ordered(store) => store.name(),
            Self::Mapping(store) => store.name(),
        }
    }
}

impl From<OrderedStore> for FeedStore {
    fn from(store: OrderedStore) -> Self {
        Self::Ordered(store)
    }
}

impl From<MappingStore> for FeedStore {
    fn from(store: MappingStore) -> Self {
        Self::Mapping(store)
    }
}
