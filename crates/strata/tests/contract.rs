//! Behaviour both sparse lists share, checked through the facade.

use strata::prelude::*;
use strata::types::INDEX_NOT_FOUND;

/// Run the shared contract; `unwritten` is the error a read of an unwritten
/// slot at `index` must produce.
fn exercise<L, E>(mut list: L, unwritten: E)
where
    L: SparseList<&'static str>,
    E: Fn(i64) -> CollectionError,
{
    assert!(list.is_empty());
    assert_eq!(list.add("a").unwrap(), 0);
    list.set(-3, "z").unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list.lowest(), -3);
    assert_eq!(list.highest(), 0);

    // Idempotent double write.
    list.set(2, "b").unwrap();
    list.set(2, "b").unwrap();
    assert_eq!(list.get(2), Ok(&"b"));
    assert_eq!(list.len(), 6);

    assert!(list.is_set(-3));
    assert!(!list.is_set(1));
    assert_eq!(list.get(1), Err(unwritten(1)));

    assert_eq!(list.index_of(&"b"), 2);
    assert_eq!(list.index_of(&"q"), INDEX_NOT_FOUND);
    assert!(list.contains(&"z"));

    for err in [
        list.insert(0, "x").unwrap_err(),
        list.remove(&"a").unwrap_err(),
        list.remove_at(0).unwrap_err(),
    ] {
        assert!(matches!(err, CollectionError::Unsupported { .. }));
    }

    list.clear();
    assert_eq!(list.len(), 0);
    assert!(!list.is_set(2));
    assert!(list.get(2).is_err());
}

#[test]
fn segmented_honours_list_contract() {
    exercise(SegmentedArray::new(), |index| CollectionError::NotFound {
        index,
    });
}

#[test]
fn paged_honours_list_contract() {
    exercise(PagedArray::new(), |index| CollectionError::OutOfRange {
        index,
        min: -33_554_432,
        max: 33_554_432,
    });
}

#[test]
fn facade_exposes_constants() {
    assert_eq!(SegmentConfig::DEFAULT_GROWTH_RATE, 1.25);
    assert_eq!(SegmentConfig::DEFAULT_MIN_CAPACITY, 1024);
    assert_eq!(PageConfig::MIN_DEPTH, 2);
    assert_eq!(PageConfig::MAX_DEPTH, 1024);
}
