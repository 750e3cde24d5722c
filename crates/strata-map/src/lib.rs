//! Ordered concurrent map for Strata.
//!
//! [`OrderedConcurrentMap`] pairs a sharded hash map for lookups with an
//! insertion-ordered sequence for enumeration. Lookups never wait on the
//! sequence; every mutation takes the sequence's write lock, so both
//! structures always hold the same key set. The enumeration order can be
//! changed after the fact with [`reorder_by_key`] or [`reorder_by`].
//!
//! [`reorder_by_key`]: OrderedConcurrentMap::reorder_by_key
//! [`reorder_by`]: OrderedConcurrentMap::reorder_by

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod map;

pub use direction::ReorderDirection;
pub use map::OrderedConcurrentMap;
