use super::*;

/// Tests persisting the flat layout.
///
/// Expected: Ok, file holds records ascending and `last_checked` is the given time
#[test]
fn writes_flat_array() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 10);
    store.merge(vec![record("B", 2), record("A", 1)]);

    store.persist(at(5)).unwrap();

    let written = test.read_json("mods.json")?;
    let written_ids: Vec<&str> = written
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(written_ids, vec!["A", "B"]);
    assert_eq!(written[0]["date"], "2025-01-01T00:00:00Z");
    assert_eq!(store.last_checked(), Some(at(5)));

    Ok(())
}

/// Tests persisting the category-keyed layout.
///
/// Expected: Ok with one array per category
#[test]
fn writes_category_groups() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(
        test.path("sw_articles.json"),
        OrderedLayout::ByCategory,
        10,
    );
    store.merge(vec![
        record("A", 1).with_category(Some("News".to_string())),
        record("B", 2).with_category(Some("Patch Notes".to_string())),
        record("C", 3).with_category(Some("News".to_string())),
    ]);

    store.persist(at(5)).unwrap();

    let written = test.read_json("sw_articles.json")?;
    assert_eq!(written["News"].as_array().unwrap().len(), 2);
    assert_eq!(written["Patch Notes"][0]["id"], "B");

    Ok(())
}

/// Tests that a failed write keeps memory authoritative.
///
/// The store path sits below a regular file, so creating its directory fails.
///
/// Expected: Err, records kept in memory and `last_checked` unchanged
#[test]
fn failed_write_keeps_state() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file("blocker", "not a directory")
        .build()?;
    let mut store = OrderedStore::new(
        test.path("blocker").join("mods.json"),
        OrderedLayout::Flat,
        10,
    );
    store.merge(vec![record("A", 1)]);

    let result = store.persist(at(5));

    assert!(result.is_err());
    assert_eq!(store.len(), 1);
    assert_eq!(store.last_checked(), None);

    Ok(())
}

/// Tests that persisted records load back identically.
///
/// Expected: reloaded store holds the same records in the same order
#[test]
fn reloads_persisted_records() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 10);
    store.merge(vec![
        record("B", 2).with_version(Some("1.1".to_string())),
        record("A", 1),
    ]);
    store.persist(at(5)).unwrap();

    let reloaded = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 10);

    assert_eq!(reloaded.records(), store.records());

    Ok(())
}
