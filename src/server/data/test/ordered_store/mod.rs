use crate::server::{
    data::ordered_store::{OrderedLayout, OrderedStore},
    model::record::Record,
};
use chrono::{DateTime, TimeZone, Utc};
use test_utils::{builder::TestBuilder, error::TestError, factory};

mod load;
mod merge;
mod persist;

/// Midnight UTC of the given day in January 2025.
fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
}

/// Record whose URL is derived from its id.
fn record(id: &str, day: u32) -> Record {
    Record::new(id, id, format!("https://example.com/records/{}", id), at(day))
}

fn ids(store: &OrderedStore) -> Vec<&str> {
    store.records().iter().map(|r| r.identity()).collect()
}
