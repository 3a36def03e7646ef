use super::*;

/// Tests polling twice against an unchanged upstream.
///
/// Expected: second poll dispatches nothing and does not write
#[tokio::test(start_paused = true)]
async fn repeated_poll_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![record("A", 1), record("B", 2)]));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);

    let first = completed(engine.poll().await);
    let second = completed(engine.poll().await);

    assert_eq!(first.sent, 2);
    assert!(first.persisted);
    assert_eq!(second.new, 0);
    assert!(!second.persisted);
    assert_eq!(sink.sent().len(), 2);

    Ok(())
}

/// Tests dispatch order for records fetched out of order.
///
/// Expected: dispatched oldest first regardless of fetch order
#[tokio::test(start_paused = true)]
async fn dispatches_chronologically() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![
        record("T3", 3),
        record("T1", 1),
        record("T2", 2),
    ]));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);

    engine.poll().await;

    assert_eq!(sent_titles(&sink), vec!["T1", "T2", "T3"]);
    assert!(sink.sent().iter().all(|(channel, _)| *channel == CHANNEL));

    Ok(())
}

/// Tests the documented merge scenario.
///
/// Store holds A (Jan 1) with cap 2; the fetch returns B (Jan 3) and C (Jan 2).
///
/// Expected: dispatch order C, B; store and file hold C, B with A evicted
#[tokio::test(start_paused = true)]
async fn merges_with_cap() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 2);
    store.merge(vec![Record::new("A", "A", "u1", at(1))]);

    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![record("B", 3), record("C", 2)]));
    let engine = FeedEngine::new(adapter, store.into(), dispatcher(sink.clone()), destination());

    let report = completed(engine.poll().await);

    assert_eq!(sent_titles(&sink), vec!["C", "B"]);
    assert_eq!(report.evicted, 1);
    assert_eq!(ids(&engine.records().await), vec!["C", "B"]);

    let written = test.read_json("mods.json")?;
    assert_eq!(written[0]["id"], "C");
    assert_eq!(written[1]["id"], "B");
    assert_eq!(written.as_array().unwrap().len(), 2);

    Ok(())
}

/// Tests a poll that finds nothing.
///
/// Expected: no dispatch and no file written
#[tokio::test(start_paused = true)]
async fn empty_poll_skips_write() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(Vec::new()));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);

    let report = completed(engine.poll().await);

    assert_eq!(report, PollReport::default());
    assert!(sink.sent().is_empty());
    assert!(!test.exists("mods.json"));

    Ok(())
}

/// Tests that a failed dispatch is still committed.
///
/// Expected: failure counted, record stored and never dispatched again
#[tokio::test(start_paused = true)]
async fn failed_dispatch_is_not_retried() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new().failing_on("Broken"));
    let adapter = Arc::new(ScriptedAdapter::constant(vec![
        Record::new("1", "Broken", "https://example.com/1", at(1)),
        record("2", 2),
    ]));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);

    let first = completed(engine.poll().await);
    let second = completed(engine.poll().await);

    assert_eq!(first.sent, 1);
    assert_eq!(first.failed, 1);
    assert_eq!(engine.records().await.len(), 2);
    assert_eq!(second.new, 0);
    assert_eq!(sink.attempts(), 2);

    Ok(())
}

/// Tests a destination that is not writable.
///
/// Expected: every dispatch fails, the batch continues and records are stored
#[tokio::test(start_paused = true)]
async fn unwritable_destination_fails_batch_softly() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new().unwritable(CHANNEL));
    let adapter = Arc::new(ScriptedAdapter::constant(vec![record("A", 1), record("B", 2)]));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);

    let report = completed(engine.poll().await);

    assert_eq!(report.failed, 2);
    assert_eq!(sink.attempts(), 0);
    assert!(report.persisted);

    Ok(())
}

/// Tests that a hanging send is cut off by the send timeout.
///
/// Expected: dispatch fails after the timeout and the poll completes
#[tokio::test(start_paused = true)]
async fn hanging_send_times_out() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new().hanging(Duration::from_secs(3600)));
    let adapter = Arc::new(ScriptedAdapter::constant(vec![record("A", 1)]));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);
    let started = tokio::time::Instant::now();

    let report = completed(engine.poll().await);

    assert_eq!(report.failed, 1);
    assert_eq!(started.elapsed(), Duration::from_secs(15));
    assert_eq!(engine.records().await.len(), 1);

    Ok(())
}

/// Tests the pacing delay between consecutive sends.
///
/// Expected: three sends take two pacing intervals
#[tokio::test(start_paused = true)]
async fn paces_consecutive_sends() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![
        record("A", 1),
        record("B", 2),
        record("C", 3),
    ]));
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);
    let started = tokio::time::Instant::now();

    engine.poll().await;

    assert_eq!(started.elapsed(), Duration::from_secs(6));

    Ok(())
}

/// Tests a poll started while the previous one is still running.
///
/// Expected: second poll skipped, first completes normally
#[tokio::test(start_paused = true)]
async fn overlapping_poll_is_skipped() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(
        ScriptedAdapter::constant(vec![record("A", 1)]).with_delay(Duration::from_secs(30)),
    );
    let engine = ordered_engine(adapter, sink.clone(), test.path("mods.json"), 100);

    let (first, second) = tokio::join!(engine.poll(), async {
        tokio::task::yield_now().await;
        assert_eq!(engine.state(), PollState::Fetching);
        engine.poll().await
    });

    assert_eq!(second, PollOutcome::Skipped);
    assert_eq!(completed(first).sent, 1);
    assert_eq!(engine.state(), PollState::Idle);
    assert_eq!(sink.sent().len(), 1);

    Ok(())
}

/// Tests that a failed write keeps the poll's records in memory.
///
/// Expected: persisted false, records kept and not dispatched again next poll
#[tokio::test(start_paused = true)]
async fn failed_persist_keeps_memory_state() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file("blocker", "not a directory")
        .build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![record("A", 1)]));
    let engine = ordered_engine(
        adapter.clone(),
        sink.clone(),
        test.path("blocker").join("mods.json"),
        100,
    );

    let first = completed(engine.poll().await);
    let second = completed(engine.poll().await);

    assert!(!first.persisted);
    assert_eq!(second.new, 0);
    assert_eq!(sink.sent().len(), 1);
    assert_eq!(adapter.contexts()[1].last_checked, None);

    Ok(())
}

/// Tests the check time handed to the adapter.
///
/// Expected: none before the first persisted poll, then the first poll's start time
#[tokio::test(start_paused = true)]
async fn passes_last_checked_to_adapter() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![record("A", 1)]));
    let engine = ordered_engine(adapter.clone(), sink, test.path("mods.json"), 100);

    engine.poll().await;
    engine.poll().await;

    let contexts = adapter.contexts();
    assert_eq!(contexts[0].last_checked, None);
    assert_eq!(contexts[1].last_checked, Some(contexts[0].now));

    Ok(())
}
