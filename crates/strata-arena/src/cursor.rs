//! Forward-only enumeration over a segment chain.
//!
//! [`SegmentCursor`] walks the observed range `[lowest, highest]` by
//! following higher links from the segment holding `lowest`. Unwritten
//! slots are skipped, and a segment whose storage was never allocated is
//! skipped in one step.

use std::iter::FusedIterator;

use strata_core::{Bounds, Cursor, CursorState};

use crate::chain::SegmentChain;
use crate::handle::{Direction, SegmentId};
use crate::segment::Placement;

/// Cursor over the written slots of a [`SegmentChain`].
///
/// Holds a shared borrow, so the chain cannot change while the cursor is
/// alive. Not meant to be shared between threads.
#[derive(Debug)]
pub struct SegmentCursor<'a, T> {
    chain: &'a SegmentChain<T>,
    bounds: Bounds,
    state: CursorState,
    /// Segment holding the current position.
    segment: Option<SegmentId>,
}

impl<'a, T> SegmentCursor<'a, T> {
    /// Create a cursor in the before-first state.
    pub fn new(chain: &'a SegmentChain<T>) -> Self {
        Self {
            chain,
            bounds: chain.observed(),
            state: CursorState::BeforeFirst,
            segment: None,
        }
    }

    fn exhaust(&mut self) -> bool {
        self.state = CursorState::Exhausted;
        self.segment = None;
        false
    }
}

impl<'a, T> Cursor for SegmentCursor<'a, T> {
    type Item = (i64, &'a T);

    fn advance(&mut self) -> bool {
        let Some(range) = self.bounds.range() else {
            return self.exhaust();
        };
        let (lowest, highest) = (*range.start(), *range.end());

        let mut index = match self.state {
            CursorState::BeforeFirst => lowest,
            CursorState::At(i) => match i.checked_add(1) {
                Some(next) => next,
                None => return self.exhaust(),
            },
            CursorState::Exhausted => return false,
        };

        let mut id = match self.segment {
            Some(id) => id,
            None => match self.chain.locate(index) {
                Ok((id, _)) => id,
                Err(_) => return self.exhaust(),
            },
        };

        while index <= highest {
            let segment = self.chain.seg(id);
            match segment.place(index) {
                Placement::Within(_) if !segment.is_allocated() => index = segment.end(),
                Placement::Within(offset) => {
                    if segment.is_set(offset) {
                        self.state = CursorState::At(index);
                        self.segment = Some(id);
                        return true;
                    }
                    match index.checked_add(1) {
                        Some(next) => index = next,
                        None => break,
                    }
                }
                Placement::Above => match segment.link(Direction::Higher) {
                    Some(next) => id = next,
                    None => break,
                },
                // Positions only move forward from a located segment.
                Placement::Below => break,
            }
        }
        self.exhaust()
    }

    fn current(&self) -> Option<(i64, &'a T)> {
        let CursorState::At(index) = self.state else {
            return None;
        };
        let segment = self.chain.segment(self.segment?)?;
        match segment.place(index) {
            Placement::Within(offset) => segment.slot(offset).map(|v| (index, v)),
            _ => None,
        }
    }

    fn state(&self) -> CursorState {
        self.state
    }

    fn reset(&mut self) {
        self.state = CursorState::BeforeFirst;
        self.segment = None;
    }
}

impl<'a, T> Iterator for SegmentCursor<'a, T> {
    type Item = (i64, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current()
        } else {
            None
        }
    }
}

impl<T> FusedIterator for SegmentCursor<'_, T> {}
