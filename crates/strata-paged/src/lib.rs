//! Fixed-range, page-table sparse arrays for Strata.
//!
//! A [`PagedArray`] addresses every index in `[-max_index, max_index]`
//! through two page tables, one per sign:
//!
//! ```text
//! index ──► |index| / depth ──► page      (positive or negative table)
//!       └─► |index| % depth ──► offset    (slot within the page)
//! ```
//!
//! `max_index = depth * width`, where `depth` (slots per page) lies in
//! `[2, 1024]` and `width` is the number of pages per sign. Each table
//! holds `width + 1` page entries so `max_index` itself is addressable.
//! Pages are allocated on first write and dropped only by
//! [`clear`](strata_core::SparseList::clear) or
//! [`set_depth`](PagedArray::set_depth).
//!
//! Reading a slot that holds no value fails with
//! [`CollectionError::OutOfRange`](strata_core::CollectionError::OutOfRange),
//! the same error as reading past `max_index`. The paged table has no
//! notion of a reachable-but-empty slot.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod paged;

pub use config::PageConfig;
pub use cursor::PageCursor;
pub use paged::PagedArray;
