//! Forward-only enumeration over a paged array.

use std::iter::FusedIterator;

use strata_core::{Bounds, Cursor, CursorState, SparseList};

use crate::paged::{Address, PagedArray, Sign};

/// Cursor over the written slots of a [`PagedArray`], in index order.
///
/// Pages that were never allocated are skipped in one step.
#[derive(Debug)]
pub struct PageCursor<'a, T> {
    array: &'a PagedArray<T>,
    bounds: Bounds,
    state: CursorState,
}

impl<'a, T> PageCursor<'a, T> {
    /// Create a cursor in the before-first state.
    pub fn new(array: &'a PagedArray<T>) -> Self {
        Self {
            array,
            bounds: array.bounds(),
            state: CursorState::BeforeFirst,
        }
    }

    /// First index past the page containing `address`.
    fn past_page(&self, address: Address) -> i64 {
        let depth = self.array.depth() as i64;
        let page = address.page as i64;
        match address.sign {
            Sign::Positive => (page + 1) * depth,
            // Negative page 0 covers [-(depth - 1), -1].
            Sign::Negative if page == 0 => 0,
            Sign::Negative => -(page * depth) + 1,
        }
    }

    fn exhaust(&mut self) -> bool {
        self.state = CursorState::Exhausted;
        false
    }
}

impl<'a, T> Cursor for PageCursor<'a, T> {
    type Item = (i64, &'a T);

    fn advance(&mut self) -> bool {
        let Some(range) = self.bounds.range() else {
            return self.exhaust();
        };
        let (lowest, highest) = (*range.start(), *range.end());

        let mut index = match self.state {
            CursorState::BeforeFirst => lowest,
            CursorState::At(i) => i + 1,
            CursorState::Exhausted => return false,
        };

        while index <= highest {
            let Ok(address) = self.array.address(index) else {
                break;
            };
            match self.array.page(address) {
                None => index = self.past_page(address),
                Some(page) if page[address.offset].is_some() => {
                    self.state = CursorState::At(index);
                    return true;
                }
                Some(_) => index += 1,
            }
        }
        self.exhaust()
    }

    fn current(&self) -> Option<(i64, &'a T)> {
        let CursorState::At(index) = self.state else {
            return None;
        };
        self.array.get(index).ok().map(|v| (index, v))
    }

    fn state(&self) -> CursorState {
        self.state
    }

    fn reset(&mut self) {
        self.state = CursorState::BeforeFirst;
    }
}

impl<'a, T> Iterator for PageCursor<'a, T> {
    type Item = (i64, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current()
        } else {
            None
        }
    }
}

impl<T> FusedIterator for PageCursor<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;

    fn array_with(keys: &[i64]) -> PagedArray<i64> {
        let mut arr = PagedArray::with_config(PageConfig::new(4, 16)).unwrap();
        for &k in keys {
            arr.set(k, k * 10).unwrap();
        }
        arr
    }

    #[test]
    fn empty_array_is_immediately_exhausted() {
        let arr = array_with(&[]);
        let mut cursor = PageCursor::new(&arr);
        assert!(!cursor.advance());
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn crosses_sign_boundary_in_order() {
        let arr = array_with(&[3, -1, 0, -4, 1, -64, 64]);
        let keys: Vec<i64> = PageCursor::new(&arr).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![-64, -4, -1, 0, 1, 3, 64]);
    }

    #[test]
    fn skips_unallocated_pages() {
        let arr = array_with(&[-50, 50]);
        let mut cursor = PageCursor::new(&arr);
        assert!(cursor.advance());
        assert_eq!(cursor.current(), Some((-50, &-500)));
        assert!(cursor.advance());
        assert_eq!(cursor.state(), CursorState::At(50));
        assert!(!cursor.advance());
    }

    #[test]
    fn past_page_lands_on_next_page_start() {
        let arr = array_with(&[]);
        let cursor = PageCursor::new(&arr);
        let at = |i| cursor.past_page(arr.address(i).unwrap());
        assert_eq!(at(0), 4);
        assert_eq!(at(7), 8);
        assert_eq!(at(-1), 0);
        assert_eq!(at(-3), 0);
        assert_eq!(at(-4), -3);
        assert_eq!(at(-7), -3);
        assert_eq!(at(-8), -7);
    }

    #[test]
    fn reset_restarts_enumeration() {
        let arr = array_with(&[-2, 2]);
        let mut cursor = PageCursor::new(&arr);
        assert_eq!(cursor.by_ref().count(), 2);
        cursor.reset();
        assert_eq!(cursor.next(), Some((-2, &-20)));
    }
}
