use super::*;

/// Tests that an unknown id is new.
///
/// Expected: true
#[test]
fn unknown_id_is_new() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = MappingStore::new(test.path("personal_mods.json"), 10);

    assert!(store.is_new(&record("101", 1, "1.0")));

    Ok(())
}

/// Tests that a changed version is new regardless of timestamp.
///
/// Expected: true for both the same and a later timestamp
#[test]
fn changed_version_is_new() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 10);
    store.merge(vec![record("101", 2, "1.0")]);

    assert!(store.is_new(&record("101", 2, "1.1")));
    assert!(store.is_new(&record("101", 3, "1.1")));

    Ok(())
}

/// Tests that a later timestamp with an unchanged version is new.
///
/// Expected: true
#[test]
fn later_timestamp_is_new() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 10);
    store.merge(vec![record("101", 2, "1.0")]);

    assert!(store.is_new(&record("101", 3, "1.0")));

    Ok(())
}

/// Tests that an identical fetch is not new.
///
/// Verifies that neither an identical record nor one with an earlier timestamp is
/// reported.
///
/// Expected: empty diff
#[test]
fn unchanged_is_not_new() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = MappingStore::new(test.path("personal_mods.json"), 10);
    store.merge(vec![record("101", 2, "1.0")]);

    let new = store.diff(vec![record("101", 2, "1.0"), record("101", 1, "1.0")]);

    assert!(new.is_empty());

    Ok(())
}

/// Tests that a repeated id inside one batch is considered once.
///
/// Expected: only the first occurrence is returned
#[test]
fn first_occurrence_wins_in_batch() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let store = MappingStore::new(test.path("personal_mods.json"), 10);

    let new = store.diff(vec![record("101", 3, "1.1"), record("101", 1, "1.0")]);

    assert_eq!(new.len(), 1);
    assert_eq!(new[0].version.as_deref(), Some("1.1"));

    Ok(())
}
