//! Deterministic data sets shared by integration tests and benches.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Default root segment capacity assumed by the fixtures.
pub const ROOT: i64 = 1024;

/// Capacity of the first neighbour grown from a default root.
pub const FIRST_NEIGHBOUR: i64 = 1280;

/// A single write and the chain shape it should produce on a fresh,
/// default-configured segmented array.
#[derive(Clone, Debug)]
pub struct IndexCase {
    pub index: i64,
    /// Whether the root gains a higher neighbour.
    pub grows_higher: bool,
    /// Whether the root gains a lower neighbour.
    pub grows_lower: bool,
    /// Total slots reserved across every segment afterwards.
    pub reserved: usize,
}

/// Writes at and around the default root's window edges.
pub fn index_cases() -> Vec<IndexCase> {
    let grown = (ROOT + FIRST_NEIGHBOUR) as usize;
    let case = |index, grows_higher, grows_lower, reserved| IndexCase {
        index,
        grows_higher,
        grows_lower,
        reserved,
    };
    vec![
        case(0, false, false, ROOT as usize),
        case(1, false, false, ROOT as usize),
        case(ROOT - 1, false, false, ROOT as usize),
        case(ROOT, true, false, grown),
        case(-1, false, true, grown),
        case(-(ROOT - 1), false, true, grown),
    ]
}

/// A batch of writes and the shape it should produce.
#[derive(Clone, Debug)]
pub struct RangeCase {
    pub keys: Vec<i64>,
    /// `highest - lowest + 1` afterwards.
    pub span: usize,
    pub grows_higher: bool,
    pub grows_lower: bool,
    pub reserved: usize,
}

/// Batches that stay inside the root or straddle one or both edges.
pub fn range_cases() -> Vec<RangeCase> {
    let root = ROOT as usize;
    let grown = (ROOT + FIRST_NEIGHBOUR) as usize;
    vec![
        RangeCase {
            keys: vec![-1, -2, -3],
            span: 3,
            grows_higher: false,
            grows_lower: true,
            reserved: grown,
        },
        RangeCase {
            keys: vec![0, 1, 2],
            span: 3,
            grows_higher: false,
            grows_lower: false,
            reserved: root,
        },
        RangeCase {
            keys: vec![ROOT - 1, ROOT],
            span: 2,
            grows_higher: true,
            grows_lower: false,
            reserved: grown,
        },
        RangeCase {
            keys: vec![-(ROOT - 1), ROOT],
            span: root * 2,
            grows_higher: true,
            grows_lower: true,
            reserved: grown + FIRST_NEIGHBOUR as usize,
        },
    ]
}

/// The same three entries in every insertion order that the ordered map
/// tests compare against.
pub fn comparison_sets() -> Vec<Vec<(i32, &'static str)>> {
    vec![
        vec![(1, "One"), (2, "Two"), (3, "Three")],
        vec![(2, "Two"), (3, "Three"), (1, "One")],
        vec![(3, "Three"), (1, "One"), (2, "Two")],
    ]
}

/// `count` distinct keys in `[-spread, spread)`, shuffled, from a seeded
/// ChaCha8 stream.
///
/// # Panics
///
/// Panics if `count` exceeds the number of keys in the range.
pub fn scattered_keys(count: usize, spread: i64, seed: u64) -> Vec<i64> {
    assert!(
        (count as u64) <= 2 * spread as u64,
        "cannot draw {count} distinct keys from [-{spread}, {spread})"
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut keys = std::collections::BTreeSet::new();
    while keys.len() < count {
        keys.insert(rng.random_range(-spread..spread));
    }
    let mut keys: Vec<i64> = keys.into_iter().collect();
    keys.shuffle(&mut rng);
    keys
}
