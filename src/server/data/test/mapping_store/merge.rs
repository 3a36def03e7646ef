use super::*;

/// Tests that merging replaces the entry stored under the same id.
///
/// Expected: one entry carrying the new version
#[test]
fn replaces_existing_entry() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 10);
    store.merge(vec![record("101", 1, "1.0")]);

    store.merge(vec![record("101", 2, "1.1")]);

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("101").unwrap().version.as_deref(), Some("1.1"));

    Ok(())
}

/// Tests the cap on a mapping store.
///
/// Expected: the entry with the oldest timestamp is evicted
#[test]
fn evicts_oldest_over_cap() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 2);

    let evicted = store.merge(vec![
        record("3", 3, "1.0"),
        record("1", 1, "1.0"),
        record("2", 2, "1.0"),
    ]);

    assert_eq!(store.len(), 2);
    assert!(store.get("1").is_none());
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].id, "1");

    Ok(())
}

/// Tests seeding an empty store and a populated store.
///
/// Expected: seed inserted only while the store is empty
#[test]
fn seeds_only_when_empty() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 10);

    assert!(store.seed(record("11814", 1, "1.0")));
    assert!(!store.seed(record("999", 1, "1.0")));

    assert_eq!(store.len(), 1);
    assert!(store.get("11814").is_some());
    assert!(!store.is_new(&record("11814", 1, "1.0")));

    Ok(())
}
