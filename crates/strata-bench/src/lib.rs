//! Benchmark workloads for the Strata collections.
//!
//! - [`populated_segmented`] / [`populated_paged`]: collections pre-filled
//!   with a deterministic scattered key set.
//! - [`populated_map`]: an ordered map filled in shuffled key order.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_arena::SegmentedArray;
use strata_core::SparseList;
use strata_map::OrderedConcurrentMap;
use strata_paged::PagedArray;
use strata_test_utils::scattered_keys;

/// Key spread used by every workload: `[-1_000_000, 1_000_000)`.
pub const SPREAD: i64 = 1_000_000;

/// A segmented array holding `count` scattered keys, each mapped to itself.
pub fn populated_segmented(count: usize, seed: u64) -> (SegmentedArray<i64>, Vec<i64>) {
    let keys = scattered_keys(count, SPREAD, seed);
    let mut arr = SegmentedArray::new();
    for &k in &keys {
        arr.set(k, k).expect("segmented chain reaches every bench key");
    }
    (arr, keys)
}

/// A default-shaped paged array holding `count` scattered keys.
pub fn populated_paged(count: usize, seed: u64) -> (PagedArray<i64>, Vec<i64>) {
    let keys = scattered_keys(count, SPREAD, seed);
    let mut arr = PagedArray::new();
    for &k in &keys {
        arr.set(k, k).expect("bench keys lie within the default range");
    }
    (arr, keys)
}

/// An ordered map of `count` entries inserted in shuffled key order.
pub fn populated_map(count: usize, seed: u64) -> OrderedConcurrentMap<i64, u64> {
    scattered_keys(count, SPREAD, seed)
        .into_iter()
        .map(|k| (k, k.unsigned_abs()))
        .collect()
}
