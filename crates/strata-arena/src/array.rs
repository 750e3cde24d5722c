//! List-like facade over a segment chain.

use strata_core::{Bounds, CollectionError, SparseList};

use crate::chain::SegmentChain;
use crate::config::SegmentConfig;
use crate::cursor::SegmentCursor;

/// A sparse array over the full `i64` index space, backed by a chain of
/// lazily allocated segments.
///
/// Any index may be written; the chain grows toward it in steps of
/// `growth_rate`. Only written slots are visible on read and during
/// enumeration.
///
/// # Examples
///
/// ```
/// use strata_arena::SegmentedArray;
/// use strata_core::SparseList;
///
/// let mut arr = SegmentedArray::new();
/// arr.set(-10, "low").unwrap();
/// arr.set(5000, "high").unwrap();
///
/// assert_eq!(arr.lowest(), -10);
/// assert_eq!(arr.highest(), 5000);
/// assert_eq!(arr.len(), 5011);
/// assert_eq!(arr.get(5000), Ok(&"high"));
///
/// let written: Vec<_> = arr.iter().collect();
/// assert_eq!(written, vec![(-10, &"low"), (5000, &"high")]);
/// ```
#[derive(Clone, Debug)]
pub struct SegmentedArray<T> {
    chain: SegmentChain<T>,
}

impl<T> SegmentedArray<T> {
    /// Create an empty array with the default configuration.
    pub fn new() -> Self {
        Self {
            chain: SegmentChain::new_unchecked(SegmentConfig::default()),
        }
    }

    /// Create an empty array whose root segment requests `capacity` slots.
    ///
    /// Capacities below the minimum are raised to it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chain: SegmentChain::new_unchecked(SegmentConfig::new(capacity)),
        }
    }

    /// Create an empty array with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidArgument`] if `config` fails validation.
    pub fn with_config(config: SegmentConfig) -> Result<Self, CollectionError> {
        Ok(Self {
            chain: SegmentChain::new(config)?,
        })
    }

    /// Create an array holding a single value at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if `index` cannot be reached.
    pub fn from_seed(index: i64, value: T) -> Result<Self, CollectionError> {
        let mut arr = Self::new();
        arr.set(index, value)?;
        Ok(arr)
    }

    /// Create an array holding `values` at indices `0..n`.
    ///
    /// The root segment is sized to hold every value when the iterator
    /// reports its length.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let mut arr = Self::with_capacity(values.size_hint().0);
        arr.extend(values);
        arr
    }

    /// Enumerate written slots in index order.
    pub fn iter(&self) -> SegmentCursor<'_, T> {
        SegmentCursor::new(&self.chain)
    }

    /// Same as [`iter`](Self::iter), named for the cursor protocol.
    pub fn cursor(&self) -> SegmentCursor<'_, T> {
        self.iter()
    }

    /// Written values in index order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// The underlying chain.
    pub fn chain(&self) -> &SegmentChain<T> {
        &self.chain
    }

    /// Number of segments created so far.
    pub fn segment_count(&self) -> usize {
        self.chain.segment_count()
    }

    /// The configuration governing growth.
    pub fn config(&self) -> &SegmentConfig {
        self.chain.config()
    }
}

impl<T> SparseList<T> for SegmentedArray<T> {
    fn get(&self, index: i64) -> Result<&T, CollectionError> {
        self.chain.read(index)
    }

    fn get_mut(&mut self, index: i64) -> Result<&mut T, CollectionError> {
        self.chain.read_mut(index)
    }

    fn set(&mut self, index: i64, value: T) -> Result<(), CollectionError> {
        self.chain.write(index, value).map(drop)
    }

    fn is_set(&self, index: i64) -> bool {
        self.chain.is_set(index)
    }

    fn bounds(&self) -> Bounds {
        self.chain.observed()
    }

    fn clear(&mut self) {
        self.chain.clear();
    }

    fn position(&self, value: &T) -> Option<i64>
    where
        T: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(i, _)| i)
    }
}

impl<T> Default for SegmentedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for SegmentedArray<T> {
    /// Append each value at `highest + 1`.
    ///
    /// # Panics
    ///
    /// Panics if an append would pass `i64::MAX`.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value)
                .expect("append index stays below i64::MAX");
        }
    }
}

impl<T> FromIterator<T> for SegmentedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<'a, T> IntoIterator for &'a SegmentedArray<T> {
    type Item = (i64, &'a T);
    type IntoIter = SegmentCursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
