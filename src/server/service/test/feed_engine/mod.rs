use std::{sync::Arc, time::Duration};

use crate::server::{
    data::{
        feed_store::FeedStore,
        mapping_store::MappingStore,
        ordered_store::{OrderedLayout, OrderedStore},
    },
    model::{notification::MessageStyle, record::Record},
    service::{
        dispatcher::{Destination, Dispatcher},
        feed::engine::{FeedEngine, PollOutcome, PollReport, PollState},
        test::fakes::{at, record, RecordingSink, ScriptedAdapter},
    },
};
use test_utils::{builder::TestBuilder, error::TestError};

mod mapping;
mod poll;
mod seed;

const CHANNEL: u64 = 1001;

fn destination() -> Destination {
    Destination {
        channel_id: CHANNEL,
        style: MessageStyle::Text,
        heading: "New Mod Update for Test Game".to_string(),
    }
}

fn dispatcher(sink: Arc<RecordingSink>) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(
        sink,
        Duration::from_secs(3),
        Duration::from_secs(15),
    ))
}

/// Builds an engine over an ordered store at `path`.
fn ordered_engine(
    adapter: Arc<ScriptedAdapter>,
    sink: Arc<RecordingSink>,
    path: std::path::PathBuf,
    cap: usize,
) -> FeedEngine {
    FeedEngine::new(
        adapter,
        OrderedStore::new(path, OrderedLayout::Flat, cap).into(),
        dispatcher(sink),
        destination(),
    )
}

/// Titles of the notifications in send order, read from the `**Title**:` line.
fn sent_titles(sink: &RecordingSink) -> Vec<String> {
    sink.sent_texts()
        .iter()
        .filter_map(|text| {
            text.lines()
                .find_map(|line| line.strip_prefix("**Title**: "))
                .map(str::to_string)
        })
        .collect()
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.identity()).collect()
}

fn completed(outcome: PollOutcome) -> PollReport {
    match outcome {
        PollOutcome::Completed(report) => report,
        PollOutcome::Skipped => panic!("poll was skipped"),
    }
}
