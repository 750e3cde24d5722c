//! Core types and traits shared by the Strata collections.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! contract that both sparse list implementations honour:
//!
//! - [`CollectionError`]: the error taxonomy for every collection.
//! - [`Bounds`]: observed lowest/highest written index tracking.
//! - [`SparseList`]: list-like access over a signed, sparse index space.
//! - [`Cursor`] and [`CursorState`]: the forward-only enumeration protocol.
//!
//! Every logical index permanently identifies one slot. Operations that
//! would renumber slots (`insert`, `remove`, `remove_at`) are rejected
//! with [`CollectionError::Unsupported`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod error;
pub mod traits;

pub use bounds::Bounds;
pub use error::CollectionError;
pub use traits::{Cursor, CursorState, SparseList};

/// Value returned by [`SparseList::index_of`] when no written slot holds
/// the requested value.
///
/// `i64::MIN` is never a reachable index for either collection: the
/// segmented chain cannot grow that far before its start offset
/// underflows, and the paged collection's range is bounded by
/// `depth * width`.
pub const INDEX_NOT_FOUND: i64 = i64::MIN;
