//! List and cursor abstractions shared by the segmented and paged
//! collections.

use crate::bounds::Bounds;
use crate::error::CollectionError;
use crate::INDEX_NOT_FOUND;

/// List-like access over a sparse, signed index space.
///
/// Implementors store only written slots. `len()` is the width of the
/// observed range (`highest - lowest + 1`), so holes count toward it.
/// Appends write at `highest + 1`, or at 0 before the first write.
///
/// Slots are permanent: [`insert`](SparseList::insert),
/// [`remove`](SparseList::remove) and [`remove_at`](SparseList::remove_at)
/// always fail with [`CollectionError::Unsupported`].
pub trait SparseList<T> {
    /// Read the value written at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if `index` is not addressable.
    /// A slot that was never written fails with
    /// [`CollectionError::NotFound`] on collections that can tell the two
    /// apart, and with `OutOfRange` on those that cannot.
    fn get(&self, index: i64) -> Result<&T, CollectionError>;

    /// Mutable access to the value written at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](SparseList::get).
    fn get_mut(&mut self, index: i64) -> Result<&mut T, CollectionError>;

    /// Write `value` at `index`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if the collection cannot address
    /// `index`.
    fn set(&mut self, index: i64, value: T) -> Result<(), CollectionError>;

    /// Whether a value has been written at `index`.
    ///
    /// Never fails: unaddressable indices are simply not set.
    fn is_set(&self, index: i64) -> bool;

    /// Observed lowest/highest written index.
    fn bounds(&self) -> Bounds;

    /// Discard every value and return to the empty state.
    fn clear(&mut self);

    /// Lowest written index, or 0 if empty.
    fn lowest(&self) -> i64 {
        self.bounds().lowest()
    }

    /// Highest written index, or 0 if empty.
    fn highest(&self) -> i64 {
        self.bounds().highest()
    }

    /// `highest - lowest + 1`, or 0 if nothing has been written.
    fn len(&self) -> usize {
        self.bounds().len()
    }

    /// Whether nothing has been written since construction or the last
    /// [`clear`](SparseList::clear).
    fn is_empty(&self) -> bool {
        self.bounds().is_empty()
    }

    /// Append `value` at `highest + 1` (or 0 if empty), returning the index
    /// it was written to.
    fn add(&mut self, value: T) -> Result<i64, CollectionError> {
        let index = self.next_index()?;
        self.set(index, value)?;
        Ok(index)
    }

    /// Append every value of `values`, starting at `highest + 1` (or 0 if
    /// empty).
    fn add_range<I>(&mut self, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let index = self.next_index()?;
        self.add_range_at(index, values)
    }

    /// Write `values` to consecutive indices starting at `index`.
    ///
    /// This overwrites existing values where the ranges overlap; it never
    /// shifts existing slots.
    fn add_range_at<I>(&mut self, index: i64, values: I) -> Result<(), CollectionError>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut next = Some(index);
        for value in values {
            let at = next.ok_or_else(|| CollectionError::OutOfRange {
                index: i64::MAX,
                min: self.lowest(),
                max: self.highest(),
            })?;
            self.set(at, value)?;
            next = at.checked_add(1);
        }
        Ok(())
    }

    /// Index of the first written slot equal to `value`, scanning from
    /// `lowest` to `highest`.
    fn position(&self, value: &T) -> Option<i64>
    where
        T: PartialEq,
    {
        self.bounds()
            .range()?
            .find(|&i| self.get(i).is_ok_and(|v| v == value))
    }

    /// Like [`position`](SparseList::position), but returns
    /// [`INDEX_NOT_FOUND`] when absent.
    fn index_of(&self, value: &T) -> i64
    where
        T: PartialEq,
    {
        self.position(value).unwrap_or(INDEX_NOT_FOUND)
    }

    /// Whether any written slot equals `value`.
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.position(value).is_some()
    }

    /// Always fails: inserting would shift every later slot.
    fn insert(&mut self, index: i64, value: T) -> Result<(), CollectionError> {
        let _ = (index, value);
        Err(CollectionError::Unsupported {
            operation: "insert",
        })
    }

    /// Always fails: removing would shift every later slot.
    fn remove(&mut self, value: &T) -> Result<bool, CollectionError> {
        let _ = value;
        Err(CollectionError::Unsupported {
            operation: "remove",
        })
    }

    /// Always fails: removing would shift every later slot.
    fn remove_at(&mut self, index: i64) -> Result<(), CollectionError> {
        let _ = index;
        Err(CollectionError::Unsupported {
            operation: "remove_at",
        })
    }

    /// The index an append would write to.
    #[doc(hidden)]
    fn next_index(&self) -> Result<i64, CollectionError> {
        let bounds = self.bounds();
        bounds.next_index().ok_or(CollectionError::OutOfRange {
            index: i64::MAX,
            min: bounds.lowest(),
            max: bounds.highest(),
        })
    }
}

/// Where a [`Cursor`] currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Before the first written slot; no current value.
    BeforeFirst,
    /// On a written slot.
    At(i64),
    /// Past `highest`; every further advance returns `false`.
    Exhausted,
}

/// Forward-only, restartable enumeration over written slots.
///
/// State machine: `BeforeFirst -> At(i)* -> Exhausted`. Unwritten slots are
/// skipped. [`reset`](Cursor::reset) returns to `BeforeFirst`.
pub trait Cursor {
    /// The value produced at each written slot.
    type Item;

    /// Move to the next written slot. Returns `false` once exhausted.
    fn advance(&mut self) -> bool;

    /// The slot under the cursor, or `None` outside the `At` state.
    fn current(&self) -> Option<Self::Item>;

    /// Current state.
    fn state(&self) -> CursorState;

    /// Return to the before-first state.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Minimal reference implementation over a `BTreeMap` with no range
    /// limit, used to exercise the provided methods.
    #[derive(Default)]
    struct MapList {
        slots: BTreeMap<i64, u32>,
        bounds: Bounds,
    }

    impl SparseList<u32> for MapList {
        fn get(&self, index: i64) -> Result<&u32, CollectionError> {
            self.slots
                .get(&index)
                .ok_or(CollectionError::NotFound { index })
        }

        fn get_mut(&mut self, index: i64) -> Result<&mut u32, CollectionError> {
            self.slots
                .get_mut(&index)
                .ok_or(CollectionError::NotFound { index })
        }

        fn set(&mut self, index: i64, value: u32) -> Result<(), CollectionError> {
            self.slots.insert(index, value);
            self.bounds.widen(index);
            Ok(())
        }

        fn is_set(&self, index: i64) -> bool {
            self.slots.contains_key(&index)
        }

        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn clear(&mut self) {
            self.slots.clear();
            self.bounds = Bounds::EMPTY;
        }
    }

    #[test]
    fn add_starts_at_zero_then_appends() {
        let mut list = MapList::default();
        assert_eq!(list.add(10).unwrap(), 0);
        assert_eq!(list.add(11).unwrap(), 1);
        list.set(-5, 1).unwrap();
        assert_eq!(list.add(12).unwrap(), 2);
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn add_range_at_overwrites_overlap() {
        let mut list = MapList::default();
        list.add_range([1, 2, 3]).unwrap();
        list.add_range_at(1, [20, 30, 40]).unwrap();
        assert_eq!(*list.get(0).unwrap(), 1);
        assert_eq!(*list.get(1).unwrap(), 20);
        assert_eq!(*list.get(3).unwrap(), 40);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn index_of_uses_sentinel() {
        let mut list = MapList::default();
        list.add_range_at(-2, [7, 8, 9]).unwrap();
        assert_eq!(list.index_of(&8), -1);
        assert_eq!(list.index_of(&99), INDEX_NOT_FOUND);
        assert!(list.contains(&9));
        assert!(!list.contains(&99));
    }

    #[test]
    fn position_on_empty_is_none() {
        let list = MapList::default();
        assert_eq!(list.position(&0), None);
    }

    #[test]
    fn renumbering_operations_are_unsupported() {
        let mut list = MapList::default();
        list.add(1).unwrap();
        assert!(matches!(
            list.insert(0, 2),
            Err(CollectionError::Unsupported { operation: "insert" })
        ));
        assert!(matches!(
            list.remove(&1),
            Err(CollectionError::Unsupported { operation: "remove" })
        ));
        assert!(matches!(
            list.remove_at(0),
            Err(CollectionError::Unsupported {
                operation: "remove_at"
            })
        ));
        assert_eq!(*list.get(0).unwrap(), 1);
    }

    #[test]
    fn add_past_i64_max_is_out_of_range() {
        let mut list = MapList::default();
        list.set(i64::MAX, 1).unwrap();
        assert!(matches!(
            list.add(2),
            Err(CollectionError::OutOfRange { .. })
        ));
    }
}
