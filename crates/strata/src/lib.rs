//! Strata: sparse collections addressed by signed 64-bit indices, plus an
//! ordered concurrent map.
//!
//! This is the facade crate that re-exports the public API of every Strata
//! sub-crate.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // Unbounded in both directions; storage grows as indices are touched.
//! let mut chain = SegmentedArray::new();
//! chain.set(-5_000, "far left").unwrap();
//! chain.set(9_000, "far right").unwrap();
//! assert_eq!(chain.len(), 14_001);
//! assert!(matches!(chain.get(0), Err(CollectionError::NotFound { .. })));
//!
//! // Fixed range [-64, 64], allocated page by page.
//! let mut table = PagedArray::with_config(PageConfig::new(8, 8)).unwrap();
//! table.add_range([1, 2, 3]).unwrap();
//! assert_eq!(table.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! // Lookups by key, enumeration in a separately controlled order.
//! let map = OrderedConcurrentMap::from_pairs([("b", 2), ("a", 1)]);
//! map.reorder_by_key(|k, _| *k, ReorderDirection::Ascending);
//! assert_eq!(map.keys(), vec!["a", "b"]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | `SparseList`, `Cursor`, `Bounds`, `CollectionError` |
//! | [`arena`] | `strata-arena` | `SegmentedArray` and its segment chain |
//! | [`paged`] | `strata-paged` | `PagedArray` and its page tables |
//! | [`map`] | `strata-map` | `OrderedConcurrentMap` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared traits, bounds tracking and errors (`strata-core`).
pub use strata_core as types;

/// Segment-chain sparse arrays (`strata-arena`).
///
/// [`arena::SegmentedArray`] accepts any `i64` index and grows a chain of
/// windows on demand.
pub use strata_arena as arena;

/// Fixed-range page-table sparse arrays (`strata-paged`).
pub use strata_paged as paged;

/// Ordered concurrent map (`strata-map`).
pub use strata_map as map;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core traits and errors
    pub use strata_core::{Bounds, CollectionError, Cursor, CursorState, SparseList};

    // Collections
    pub use strata_arena::{SegmentConfig, SegmentedArray};
    pub use strata_map::{OrderedConcurrentMap, ReorderDirection};
    pub use strata_paged::{PageConfig, PagedArray};
}
