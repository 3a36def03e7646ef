use super::*;

/// Tests loading a store whose file does not exist.
///
/// Verifies that the store starts empty and writes an empty array so the file exists
/// for the next start.
///
/// Expected: empty store and `mods.json` containing `[]`
#[test]
fn creates_missing_file() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;

    let store = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 10);

    assert!(store.is_empty());
    assert_eq!(store.last_checked(), None);
    assert_eq!(test.read_json("mods.json")?, serde_json::json!([]));

    Ok(())
}

/// Tests loading a corrupt store file.
///
/// Expected: empty store, file replaced with a valid empty array
#[test]
fn reinitializes_corrupt_file() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file("mods.json", "[{\"title\": ")
        .build()?;

    let store = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 10);

    assert!(store.is_empty());
    assert_eq!(test.read_json("mods.json")?, serde_json::json!([]));

    Ok(())
}

/// Tests that invalid entries are dropped individually.
///
/// Verifies that an entry with an unparseable date and an entry missing its title do
/// not discard the valid entries around them.
///
/// Expected: only the valid record is loaded
#[test]
fn drops_invalid_entries() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "mods.json",
            serde_json::json!([
                factory::record::create_record("A", "2025-01-01T00:00:00Z"),
                factory::record::RecordFactory::new().date("not a date").build(),
                { "url": "https://example.com/untitled", "date": "2025-01-02T00:00:00Z" },
            ]),
        )
        .build()?;

    let store = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 10);

    assert_eq!(ids(&store), vec!["A"]);

    Ok(())
}

/// Tests that a hand-edited, unordered file is normalized on load.
///
/// Verifies records are re-sorted ascending and duplicate identities collapse to the
/// earliest entry.
///
/// Expected: records ordered A, B, C with the duplicate B dropped
#[test]
fn sorts_and_deduplicates() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "mods.json",
            serde_json::json!([
                factory::record::create_record("C", "2025-01-03T00:00:00Z"),
                factory::record::create_record("A", "2025-01-01T00:00:00Z"),
                factory::record::create_record("B", "2025-01-02T00:00:00Z"),
                factory::record::create_record("B", "2025-01-04T00:00:00Z"),
            ]),
        )
        .build()?;

    let store = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 10);

    assert_eq!(ids(&store), vec!["A", "B", "C"]);
    assert_eq!(store.records()[1].timestamp, at(2));

    Ok(())
}

/// Tests that legacy entries without an id are identified by URL.
///
/// Expected: record loaded and found by its URL
#[test]
fn legacy_entries_use_url_identity() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "mods.json",
            serde_json::json!([factory::record::RecordFactory::new()
                .without_id()
                .url("u1")
                .date("2025-01-01T00:00:00.000Z")
                .build()]),
        )
        .build()?;

    let store = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 10);

    assert!(store.contains("u1"));

    Ok(())
}

/// Tests loading the category-keyed layout.
///
/// Verifies that records without their own category inherit the key they were stored
/// under and that records from all groups merge into one ordered list.
///
/// Expected: records ordered across groups with categories taken from the keys
#[test]
fn loads_category_groups() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "sw_articles.json",
            serde_json::json!({
                "Community": [factory::record::create_record("B", "2025-01-02T00:00:00Z")],
                "Patch Notes": [factory::record::create_record("A", "2025-01-01T00:00:00Z")],
            }),
        )
        .build()?;

    let store = OrderedStore::load(
        test.path("sw_articles.json"),
        OrderedLayout::ByCategory,
        10,
    );

    assert_eq!(ids(&store), vec!["A", "B"]);
    assert_eq!(store.records()[0].category, "Patch Notes");
    assert_eq!(store.records()[1].category, "Community");

    Ok(())
}

/// Tests that the cap is applied when a file holds more records than allowed.
///
/// Expected: only the newest `cap` records remain
#[test]
fn applies_cap_on_load() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "mods.json",
            serde_json::json!([
                factory::record::create_record("A", "2025-01-01T00:00:00Z"),
                factory::record::create_record("B", "2025-01-02T00:00:00Z"),
                factory::record::create_record("C", "2025-01-03T00:00:00Z"),
            ]),
        )
        .build()?;

    let store = OrderedStore::load(test.path("mods.json"), OrderedLayout::Flat, 2);

    assert_eq!(ids(&store), vec!["B", "C"]);
    assert!(!store.contains("A"));

    Ok(())
}
