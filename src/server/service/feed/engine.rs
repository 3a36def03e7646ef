//! Poll orchestration for one feed.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::Utc;
use tokio::sync::{watch, Mutex};

use crate::server::{
    data::feed_store::FeedStore,
    error::AppError,
    model::record::{sort_chronologically, Record},
    service::{
        adapter::{FetchAdapter, FetchContext},
        dispatcher::{Destination, DispatchOutcome, Dispatcher},
    },
};

/// Phase of a feed's poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
    Diffing,
    Dispatching,
    Persisting,
}

/// Counters describing one completed poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    pub fetched: usize,
    pub new: usize,
    pub sent: usize,
    pub failed: usize,
    pub evicted: usize,
    /// Whether the store was written. False when nothing was new or the write failed.
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A poll of the same feed was still running; nothing was done.
    Skipped,
    Completed(PollReport),
}

/// Marks a feed busy for the lifetime of one poll.
///
/// Dropping the guard, including on cancellation or panic, returns the feed to `Idle`.
struct PollGuard<'a> {
    in_progress: &'a AtomicBool,
    state: &'a watch::Sender<PollState>,
}

impl<'a> PollGuard<'a> {
    fn acquire(in_progress: &'a AtomicBool, state: &'a watch::Sender<PollState>) -> Option<Self> {
        in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { in_progress, state })
    }

    fn enter(&self, state: PollState) {
        self.state.send_replace(state);
    }
}

impl Drop for PollGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(PollState::Idle);
        self.in_progress.store(false, Ordering::Release);
    }
}

/// Change-detection pipeline of one feed.
pub struct FeedEngine {
    name: String,
    adapter: Arc<dyn FetchAdapter>,
    store: Mutex<FeedStore>,
    dispatcher: Arc<Dispatcher>,
    destination: Destination,
    in_progress: AtomicBool,
    state: watch::Sender<PollState>,
}

impl FeedEngine {
    /// Creates a new FeedEngine.
    ///
    /// # Arguments
    /// - `adapter` - Source of records for this feed
    /// - `store` - Loaded store; owned by the engine from now on
    /// - `dispatcher` - Shared notification dispatcher
    /// - `destination` - Channel and presentation of this feed's notifications
    pub fn new(
        adapter: Arc<dyn FetchAdapter>,
        store: FeedStore,
        dispatcher: Arc<Dispatcher>,
        destination: Destination,
    ) -> Self {
        Self {
            name: adapter.name().to_string(),
            adapter,
            store: Mutex::new(store),
            dispatcher,
            destination,
            in_progress: AtomicBool::new(false),
            state: watch::Sender::new(PollState::Idle),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current phase of the poll cycle.
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }

    /// Receiver observing phase changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    /// Copy of the stored records, ascending by timestamp.
    pub async fn records(&self) -> Vec<Record> {
        self.store.lock().await.records()
    }

    /// Inserts a bootstrap seed into an empty store and persists it.
    ///
    /// The seed is never dispatched. Afterwards it is an ordinary stored record, so later
    /// polls treat it as already seen.
    ///
    /// # Arguments
    /// - `record` - Seed record with a known id and fixed date
    ///
    /// # Returns
    /// - `Ok(true)` - Store was empty; seed inserted and persisted
    /// - `Ok(false)` - Store already had records; nothing changed
    /// - `Err(AppError)` - Seed inserted in memory but the write failed
    pub async fn seed(&self, record: Record) -> Result<bool, AppError> {
        let mut store = self.store.lock().await;

        if !store.seed(record) {
            return Ok(false);
        }

        tracing::info!("[{}] Seeded empty store {}", self.name, store.name());
        store.persist(Utc::now())?;

        Ok(true)
    }

    /// Runs one poll cycle.
    ///
    /// Fetches, keeps only records the store has not seen, dispatches them oldest first
    /// and commits them to the store. Records whose dispatch failed are committed too and
    /// never retried. A poll that finds nothing new neither dispatches nor writes. If the
    /// previous poll of this feed is still running the call returns immediately.
    ///
    /// # Returns
    /// - `PollOutcome::Skipped` - Another poll of this feed was in progress
    /// - `PollOutcome::Completed(PollReport)` - Poll finished; persistence failures are
    ///   logged and reflected in `PollReport::persisted`
    pub async fn poll(&self) -> PollOutcome {
        let Some(guard) = PollGuard::acquire(&self.in_progress, &self.state) else {
            tracing::warn!("[{}] Previous poll still running, skipping", self.name);
            return PollOutcome::Skipped;
        };

        let started_at = Utc::now();
        let mut report = PollReport::default();
        let mut store = self.store.lock().await;

        guard.enter(PollState::Fetching);
        let fetched = self
            .adapter
            .fetch(FetchContext {
                last_checked: store.last_checked(),
                now: started_at,
            })
            .await;
        report.fetched = fetched.len();

        guard.enter(PollState::Diffing);
        let mut new = store.diff(fetched);
        sort_chronologically(&mut new);
        report.new = new.len();

        if new.is_empty() {
            tracing::info!("[{}] No new records found", self.name);
            return PollOutcome::Completed(report);
        }

        tracing::info!("[{}] Found {} new records", self.name, new.len());
        for record in &new {
            tracing::info!("→ {} ({})", record.title, record.timestamp.to_rfc3339());
        }

        guard.enter(PollState::Dispatching);
        let mut batch = self.dispatcher.batch();
        for record in &new {
            match batch.dispatch(record, &self.destination).await {
                DispatchOutcome::Sent => report.sent += 1,
                DispatchOutcome::Failed => report.failed += 1,
            }
        }

        guard.enter(PollState::Persisting);
        let evicted = store.merge(new);
        report.evicted = evicted.len();
        if !evicted.is_empty() {
            tracing::debug!(
                "[{}] Evicted {} oldest records over cap",
                self.name,
                evicted.len()
            );
        }

        match store.persist(started_at) {
            Ok(()) => report.persisted = true,
            Err(e) => tracing::error!(
                "[{}] Failed to persist {}: {}. Keeping in-memory state",
                self.name,
                store.name(),
                e
            ),
        }

        PollOutcome::Completed(report)
    }
}
