//! Multi-threaded use of `OrderedConcurrentMap`.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use strata_map::{OrderedConcurrentMap, ReorderDirection};
use strata_test_utils::init_logging;

const WORKERS: usize = 8;
const KEYS: u64 = 10_000;

#[test]
fn concurrent_adds_keep_every_key() {
    init_logging();
    let map = Arc::new(OrderedConcurrentMap::new());
    let (tx, rx) = unbounded::<u64>();

    let handles: Vec<_> = (0..WORKERS)
        .map(|_| {
            let map = Arc::clone(&map);
            let rx = rx.clone();
            thread::spawn(move || {
                let mut added = 0usize;
                for key in rx {
                    if map.add(key, key * 2) {
                        added += 1;
                    }
                }
                added
            })
        })
        .collect();

    for key in 0..KEYS {
        tx.send(key).unwrap();
    }
    drop(tx);

    let added: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(added, KEYS as usize);
    assert_eq!(map.len(), KEYS as usize);
    assert_eq!(map.keys().len(), KEYS as usize);
    for key in 0..KEYS {
        assert_eq!(map.get(&key), Some(key * 2));
    }

    map.reorder_by_key(|k, _| *k, ReorderDirection::Ascending);
    assert_eq!(map.keys(), (0..KEYS).collect::<Vec<_>>());
}

#[test]
fn readers_run_alongside_writers() {
    init_logging();
    let map = Arc::new(OrderedConcurrentMap::<u64, u64>::new());

    let writer = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for key in 0..2_000 {
                map.insert(key, key);
                if key % 100 == 0 {
                    map.reorder_by_key(|k, _| *k, ReorderDirection::Descending);
                }
            }
        })
    };
    let reader = {
        let map = Arc::clone(&map);
        thread::spawn(move || {
            for _ in 0..200 {
                let entries = map.entries();
                // A snapshot never holds a duplicate key.
                let mut keys: Vec<u64> = entries.iter().map(|(k, _)| *k).collect();
                keys.sort_unstable();
                keys.dedup();
                assert_eq!(keys.len(), entries.len());
                assert!(entries.iter().all(|(k, v)| k == v));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(map.len(), 2_000);
}
