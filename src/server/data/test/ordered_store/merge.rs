use super::*;

/// Tests merging into a full store.
///
/// Store holds A (Jan 1) with cap 2; B (Jan 3) and C (Jan 2) arrive out of order.
///
/// Expected: store holds C, B in timestamp order and A is evicted
#[test]
fn evicts_oldest_over_cap() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 2);
    store.merge(vec![Record::new("A", "A", "u1", at(1))]);

    let evicted = store.merge(vec![record("B", 3), record("C", 2)]);

    assert_eq!(ids(&store), vec!["C", "B"]);
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].identity(), "A");
    assert!(!store.contains("A"));

    Ok(())
}

/// Tests inserting N+1 records into a store capped at N.
///
/// Expected: exactly N records remain and the oldest is gone
#[test]
fn holds_exactly_cap_records() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 3);

    store.merge(vec![record("D", 4), record("A", 1), record("C", 3), record("B", 2)]);

    assert_eq!(store.len(), 3);
    assert_eq!(ids(&store), vec!["B", "C", "D"]);

    Ok(())
}

/// Tests that records sharing a timestamp keep arrival order.
///
/// Expected: equal-timestamp records follow the already stored one in insertion order
#[test]
fn ties_keep_arrival_order() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 10);
    store.merge(vec![record("A", 2)]);

    store.merge(vec![record("B", 2), record("C", 1), record("D", 2)]);

    assert_eq!(ids(&store), vec!["C", "A", "B", "D"]);

    Ok(())
}

/// Tests inserting an identity that is already stored.
///
/// Expected: insert returns false and the stored record is unchanged
#[test]
fn ignores_known_identity() -> Result<(), TestError> {
    let test = TestBuilder::new().build()?;
    let mut store = OrderedStore::new(test.path("mods.json"), OrderedLayout::Flat, 10);
    store.merge(vec![record("A", 1)]);

    let inserted = store.insert(record("A", 9));

    assert!(!inserted);
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].timestamp, at(1));

    Ok(())
}
