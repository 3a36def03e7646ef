use super::*;

fn versioned(id: &str, day: u32, version: &str) -> Record {
    record(id, day).with_version(Some(version.to_string()))
}

fn mapping_engine(
    adapter: Arc<ScriptedAdapter>,
    sink: Arc<RecordingSink>,
    path: std::path::PathBuf,
) -> FeedEngine {
    FeedEngine::new(
        adapter,
        FeedStore::from(MappingStore::new(path, 1000)),
        dispatcher(sink),
        destination(),
    )
}

/// Tests that an in-place update with a new version is announced.
///
/// The second fetch reports the same id and timestamp with a changed version.
///
/// Expected: both versions dispatched, store keeps the latest version
#[tokio::test(start_paused = true)]
async fn version_change_is_dispatched() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::new(vec![
        vec![versioned("101", 2, "1.0")],
        vec![versioned("101", 2, "1.1")],
    ]));
    let engine = mapping_engine(adapter, sink.clone(), test.path("personal_mods.json"));

    engine.poll().await;
    let second = completed(engine.poll().await);

    assert_eq!(second.sent, 1);
    assert_eq!(sink.sent().len(), 2);
    assert!(sink.sent_texts()[1].contains("**Version**: 1.1"));

    let records = engine.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].version.as_deref(), Some("1.1"));

    let written = test.read_json("personal_mods.json")?;
    assert_eq!(written["mods"]["101"]["version"], "1.1");

    Ok(())
}

/// Tests that an unchanged mod is not announced again.
///
/// Expected: one dispatch across two polls
#[tokio::test(start_paused = true)]
async fn unchanged_mod_is_not_dispatched() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let sink = Arc::new(RecordingSink::new());
    let adapter = Arc::new(ScriptedAdapter::constant(vec![versioned("101", 2, "1.0")]));
    let engine = mapping_engine(adapter, sink.clone(), test.path("personal_mods.json"));

    engine.poll().await;
    let second = completed(engine.poll().await);

    assert_eq!(second.new, 0);
    assert_eq!(sink.sent().len(), 1);

    Ok(())
}
