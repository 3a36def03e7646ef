use super::*;

/// Tests persisting and reloading a mapping store.
///
/// Expected: Ok, file keyed by id with `lastResetDate` set to the commit time
#[test]
fn writes_keyed_layout() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 10);
    store.merge(vec![record("101", 1, "1.0"), record("202", 2, "0.3")]);

    store.persist(at(9)).unwrap();

    let written = test.read_json("personal_mods.json")?;
    assert_eq!(written["mods"]["101"]["version"], "1.0");
    assert_eq!(written["mods"]["202"]["id"], "202");
    assert_eq!(written["lastResetDate"], "2025-01-09T00:00:00Z");
    assert_eq!(store.last_reset(), at(9));

    let reloaded = MappingStore::load(test.path("personal_mods.json"), 10);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.last_reset(), at(9));

    Ok(())
}

/// Tests that a failed write does not advance `lastResetDate`.
///
/// Expected: Err and the previous reset time kept
#[test]
fn failed_write_keeps_reset_date() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file("blocker", "not a directory")
        .build()?;
    let mut store = MappingStore::new(test.path("blocker").join("personal_mods.json"), 10);
    let before = store.last_reset();
    store.merge(vec![record("101", 1, "1.0")]);

    let result = store.persist(at(9));

    assert!(result.is_err());
    assert_eq!(store.last_reset(), before);
    assert_eq!(store.len(), 1);

    Ok(())
}
