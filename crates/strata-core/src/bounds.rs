//! Observed index bounds.
//!
//! [`Bounds`] records the lowest and highest index ever written. A
//! collection's logical length is the width of that range, not the number
//! of written slots: unwritten holes between the extremes still count.

use std::ops::RangeInclusive;

/// Lowest and highest index written so far, or nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    range: Option<(i64, i64)>,
}

impl Bounds {
    /// Bounds of a collection that has never been written.
    pub const EMPTY: Bounds = Bounds { range: None };

    /// Bounds covering exactly one index.
    pub fn single(index: i64) -> Self {
        Self {
            range: Some((index, index)),
        }
    }

    /// Widen the bounds to include `index`.
    pub fn widen(&mut self, index: i64) {
        self.range = Some(match self.range {
            Some((lo, hi)) => (lo.min(index), hi.max(index)),
            None => (index, index),
        });
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(self, other: Bounds) -> Bounds {
        match (self.range, other.range) {
            (Some((a_lo, a_hi)), Some((b_lo, b_hi))) => Bounds {
                range: Some((a_lo.min(b_lo), a_hi.max(b_hi))),
            },
            (Some(_), None) => self,
            (None, _) => other,
        }
    }

    /// Lowest written index, or 0 if nothing has been written.
    pub fn lowest(&self) -> i64 {
        self.range.map_or(0, |(lo, _)| lo)
    }

    /// Highest written index, or 0 if nothing has been written.
    pub fn highest(&self) -> i64 {
        self.range.map_or(0, |(_, hi)| hi)
    }

    /// The observed range as an inclusive range, if any write occurred.
    pub fn range(&self) -> Option<RangeInclusive<i64>> {
        self.range.map(|(lo, hi)| lo..=hi)
    }

    /// `highest - lowest + 1`, or 0 if nothing has been written.
    ///
    /// Saturates at `usize::MAX` when the span does not fit.
    pub fn len(&self) -> usize {
        self.range.map_or(0, |(lo, hi)| {
            usize::try_from(hi.abs_diff(lo)).map_or(usize::MAX, |span| span.saturating_add(1))
        })
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    /// Whether `index` lies within the observed range.
    pub fn contains(&self, index: i64) -> bool {
        self.range
            .is_some_and(|(lo, hi)| (lo..=hi).contains(&index))
    }

    /// The index an append would write to: `highest + 1`, or 0 if empty.
    pub fn next_index(&self) -> Option<i64> {
        match self.range {
            Some((_, hi)) => hi.checked_add(1),
            None => Some(0),
        }
    }
}
