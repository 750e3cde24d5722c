//! Sort direction for map reorders.

use std::cmp::Ordering;

/// Direction of a [`reorder_by_key`](crate::OrderedConcurrentMap::reorder_by_key)
/// or [`reorder_by`](crate::OrderedConcurrentMap::reorder_by).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReorderDirection {
    /// Smallest selected value first.
    #[default]
    Ascending,
    /// Largest selected value first.
    Descending,
}

impl ReorderDirection {
    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}
