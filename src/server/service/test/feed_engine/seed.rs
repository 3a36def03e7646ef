use super::*;

fn seed_record() -> Record {
    Record::new(
        "11814",
        "BF Poofies",
        "https://www.nexusmods.com/starwarsbattlefront22017/mods/11814",
        at(1),
    )
}

/// Tests bootstrapping an empty personal store.
///
/// The upstream reports the seeded mod unchanged on every poll.
///
/// Expected: seed stored and persisted, never dispatched
#[tokio::test(start_paused = true)]
async fn seed_is_never_dispatched() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![seed_record()]));
    let engine = FeedEngine::new(
        adapter,
        MappingStore::new(test.path("personal_mods.json"), 1000).into(),
        dispatcher(sink.clone()),
        destination(),
    );

    let seeded = engine.seed(seed_record()).await.unwrap();
    engine.poll().await;
    engine.poll().await;

    assert!(seeded);
    assert!(sink.sent().is_empty());
    assert_eq!(ids(&engine.records().await), vec!["11814"]);
    assert_eq!(
        test.read_json("personal_mods.json")?["mods"]["11814"]["date"],
        "2025-01-01T00:00:00Z"
    );

    Ok(())
}

/// Tests seeding a store that already has entries.
///
/// Expected: Ok(false) and the store unchanged
#[tokio::test(start_paused = true)]
async fn seed_skips_populated_store() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 1000);
    store.merge(vec![record("202", 3)]);
    let engine = FeedEngine::new(
        Arc::new(ScriptedAdapter::constant(Vec::new())),
        store.into(),
        dispatcher(Arc::new(RecordingSink::new())),
        destination(),
    );

    let seeded = engine.seed(seed_record()).await.unwrap();

    assert!(!seeded);
    assert_eq!(ids(&engine.records().await), vec!["202"]);
    assert!(!test.exists("personal_mods.json"));

    Ok(())
}
