use super::*;

/// Tests loading the keyed layout.
///
/// Expected: entries available by id and `lastResetDate` restored
#[test]
fn loads_keyed_layout() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "personal_mods.json",
            serde_json::json!({
                "mods": {
                    "101": factory::record::RecordFactory::new()
                        .id("101")
                        .version("1.0")
                        .date("2025-01-01T00:00:00Z")
                        .build(),
                },
                "lastResetDate": "2025-01-05T00:00:00Z",
            }),
        )
        .build()?;

    let store = MappingStore::load(test.path("personal_mods.json"), 10);

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("101").unwrap().version.as_deref(), Some("1.0"));
    assert_eq!(store.last_reset(), at(5));

    Ok(())
}

/// Tests loading the older list layout with a repeated id.
///
/// Expected: the entry with the latest timestamp wins
#[test]
fn loads_list_layout_keeping_latest() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_json_file(
            "personal_mods.json",
            serde_json::json!({
                "mods": [
                    factory::record::RecordFactory::new()
                        .id("101")
                        .version("2.0")
                        .date("2025-01-03T00:00:00Z")
                        .build(),
                    factory::record::RecordFactory::new()
                        .id("101")
                        .version("1.0")
                        .date("2025-01-01T00:00:00Z")
                        .build(),
                ],
            }),
        )
        .build()?;

    let store = MappingStore::load(test.path("personal_mods.json"), 10);

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("101").unwrap().version.as_deref(), Some("2.0"));

    Ok(())
}

/// Tests loading a missing file.
///
/// Expected: empty store and a file with an empty `mods` object
#[test]
fn creates_missing_file() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;

    let store = MappingStore::load(test.path("personal_mods.json"), 10);

    assert!(store.is_empty());
    let written = test.read_json("personal_mods.json")?;
    assert_eq!(written["mods"], serde_json::json!({}));
    assert!(written["lastResetDate"].is_string());

    Ok(())
}

/// Tests loading a corrupt file.
///
/// Expected: empty store, never a failure
#[test]
fn reinitializes_corrupt_file() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_raw_file("personal_mods.json", "{\"mods\": {")
        .build()?;

    let store = MappingStore::load(test.path("personal_mods.json"), 10);

    assert!(store.is_empty());
    assert!(test.read_json("personal_mods.json").is_ok());

    Ok(())
}
