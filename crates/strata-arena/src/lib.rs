//! Segment-chain sparse arrays for Strata.
//!
//! A [`SegmentedArray`] behaves like a list indexed by any `i64`, storing
//! only the slots that were written. Storage is a chain of fixed windows
//! ([`Segment`]s) that grows on demand in either direction.
//!
//! # Architecture
//!
//! ```text
//! SegmentedArray<T> (list facade, SparseList impl)
//! └── SegmentChain<T> (arena: owns every segment, chain-wide bounds)
//!     └── Segment<T>[] (window [start, start + capacity), lazy Option<T> slots)
//!         ├── lower:  Option<SegmentId>
//!         └── higher: Option<SegmentId>
//! ```
//!
//! Writing outside every window walks links from the root and creates the
//! missing neighbour with capacity `ceil(capacity * growth_rate)`
//! (default 1.25). With the default 1024-slot root, writing index 1024
//! creates `[1024, 2304)` and writing -1 creates `[-1280, 0)`.
//!
//! Segments are addressed by [`SegmentId`] handles into one `Vec`, so the
//! chain is dropped in one step and never traversed recursively.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod chain;
pub mod config;
pub mod cursor;
pub mod handle;
pub mod segment;

// Public re-exports for the primary API surface.
pub use array::SegmentedArray;
pub use chain::SegmentChain;
pub use config::SegmentConfig;
pub use cursor::SegmentCursor;
pub use handle::{Direction, SegmentId};
pub use segment::Segment;
