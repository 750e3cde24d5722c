//! Segment handles.
//!
//! A [`SegmentId`] addresses one segment inside a
//! [`SegmentChain`](crate::chain::SegmentChain). Neighbour links are
//! stored as handles rather than owning pointers, so the chain owns every
//! segment and traversal is a plain loop.

use std::fmt;

/// Index of a segment within its chain's arena.
///
/// Handles are only meaningful for the chain that issued them and are
/// invalidated by [`SegmentChain::clear`](crate::chain::SegmentChain::clear).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct SegmentId(pub(crate) u32);

impl SegmentId {
    /// The root segment of every chain.
    pub const ROOT: SegmentId = SegmentId(0);

    /// Position of the segment in the arena's storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seg#{}", self.0)
    }
}

/// Direction of a neighbour link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward lower indices.
    Lower,
    /// Toward higher indices.
    Higher,
}

impl Direction {
    /// The other direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Lower => Direction::Higher,
            Direction::Higher => Direction::Lower,
        }
    }
}
