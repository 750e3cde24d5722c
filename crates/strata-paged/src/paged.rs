//! Two-level page table sparse array.

use strata_core::{Bounds, CollectionError, SparseList};

use crate::config::PageConfig;
use crate::cursor::PageCursor;

/// A page of `depth` slots. `None` means never written.
type Page<T> = Box<[Option<T>]>;

/// Which page table an index lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Sign {
    /// Index `>= 0`.
    Positive,
    /// Index `< 0`.
    Negative,
}

/// Physical address of a logical index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Address {
    pub(crate) sign: Sign,
    pub(crate) page: usize,
    pub(crate) offset: usize,
}

/// A sparse array over the fixed range `[-max_index, max_index]`.
///
/// Indices map to `page = |index| / depth`, `offset = |index| % depth` in
/// one of two page tables chosen by sign. Pages are allocated on first
/// write; the tables themselves never grow.
///
/// # Examples
///
/// ```
/// use strata_core::{CollectionError, SparseList};
/// use strata_paged::{PageConfig, PagedArray};
///
/// let mut arr = PagedArray::with_config(PageConfig::new(1024, 32)).unwrap();
/// assert_eq!(arr.max_index(), 32_768);
///
/// arr.set(32_768, 'z').unwrap();
/// assert!(matches!(
///     arr.set(32_769, 'z'),
///     Err(CollectionError::OutOfRange { .. })
/// ));
/// ```
#[derive(Clone, Debug)]
pub struct PagedArray<T> {
    config: PageConfig,
    positive: Vec<Option<Page<T>>>,
    negative: Vec<Option<Page<T>>>,
    bounds: Bounds,
    /// Number of allocated pages across both tables.
    allocated: usize,
}

impl<T> PagedArray<T> {
    /// Create an empty array with the default depth and width.
    pub fn new() -> Self {
        let config = PageConfig::default();
        // The default tables are small enough to allocate unconditionally.
        let table = || std::iter::repeat_with(|| None).take(config.width + 1).collect();
        Self::from_tables(config, table(), table())
    }

    /// Create an empty array with `depth` slots per page and the default
    /// width.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidArgument`] if `depth` lies outside
    /// `[2, 1024]`.
    pub fn with_depth(depth: usize) -> Result<Self, CollectionError> {
        Self::with_config(PageConfig::new(depth, PageConfig::DEFAULT_WIDTH))
    }

    /// Create an empty array with an explicit page shape.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidArgument`] if `config` fails validation,
    /// or [`CollectionError::AllocationFailed`] if the page tables cannot be
    /// allocated.
    pub fn with_config(config: PageConfig) -> Result<Self, CollectionError> {
        config.validate()?;
        let positive = empty_table(config.width)?;
        let negative = empty_table(config.width)?;
        Ok(Self::from_tables(config, positive, negative))
    }

    /// Create a default-shaped array holding a single value at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if `index` lies outside the default
    /// range.
    pub fn from_seed(index: i64, value: T) -> Result<Self, CollectionError> {
        let mut arr = Self::new();
        arr.set(index, value)?;
        Ok(arr)
    }

    /// Create a default-shaped array holding `values` at indices `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if there are more values than the default range can hold.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut arr = Self::new();
        arr.extend(values);
        arr
    }

    fn from_tables(
        config: PageConfig,
        positive: Vec<Option<Page<T>>>,
        negative: Vec<Option<Page<T>>>,
    ) -> Self {
        Self {
            config,
            positive,
            negative,
            bounds: Bounds::EMPTY,
            allocated: 0,
        }
    }

    /// Drop every page and reset the bounds.
    fn reset(&mut self) {
        log::debug!(
            "resetting page tables: {} pages dropped, depth {}, width {}",
            self.allocated,
            self.config.depth,
            self.config.width
        );
        // Page tables keep their length; only the pages are dropped.
        for entry in self.positive.iter_mut().chain(self.negative.iter_mut()) {
            *entry = None;
        }
        self.bounds = Bounds::EMPTY;
        self.allocated = 0;
    }

    /// Change the page depth. All data is discarded.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Unsupported`] if `depth` lies outside
    /// `[2, 1024]`; the array is left untouched.
    pub fn set_depth(&mut self, depth: usize) -> Result<(), CollectionError> {
        let config = PageConfig::new(depth, self.config.width);
        if config.validate().is_err() {
            return Err(CollectionError::Unsupported {
                operation: "set_depth",
            });
        }
        self.config = config;
        self.reset();
        Ok(())
    }

    /// The error reported for `index` when it lies past `max_index` or
    /// holds no value.
    fn out_of_range(&self, index: i64) -> CollectionError {
        let max = self.max_index();
        CollectionError::OutOfRange {
            index,
            min: -max,
            max,
        }
    }

    /// Translate `index` into a page address.
    pub(crate) fn address(&self, index: i64) -> Result<Address, CollectionError> {
        let max = self.max_index();
        if !(-max..=max).contains(&index) {
            return Err(self.out_of_range(index));
        }
        let magnitude = index.unsigned_abs() as usize;
        let sign = if index >= 0 {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Ok(Address {
            sign,
            page: magnitude / self.config.depth,
            offset: magnitude % self.config.depth,
        })
    }

    fn table(&self, sign: Sign) -> &[Option<Page<T>>] {
        match sign {
            Sign::Positive => &self.positive,
            Sign::Negative => &self.negative,
        }
    }

    /// The page at `address`, if allocated.
    pub(crate) fn page(&self, address: Address) -> Option<&[Option<T>]> {
        self.table(address.sign)[address.page].as_deref()
    }

    fn slot(&self, address: Address) -> Option<&T> {
        self.page(address)?[address.offset].as_ref()
    }

    /// Enumerate written slots in index order.
    pub fn iter(&self) -> PageCursor<'_, T> {
        PageCursor::new(self)
    }

    /// Same as [`iter`](Self::iter), named for the cursor protocol.
    pub fn cursor(&self) -> PageCursor<'_, T> {
        self.iter()
    }

    /// Written values in index order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Highest addressable index, `depth * width`.
    pub fn max_index(&self) -> i64 {
        self.config.max_index()
    }

    /// Lowest addressable index, `-max_index`.
    pub fn min_index(&self) -> i64 {
        -self.max_index()
    }

    /// Slots per page.
    pub fn depth(&self) -> usize {
        self.config.depth
    }

    /// Pages per sign.
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// The page shape.
    pub fn config(&self) -> PageConfig {
        self.config
    }

    /// Number of pages allocated across both tables.
    pub fn allocated_pages(&self) -> usize {
        self.allocated
    }

    /// Memory held by allocated pages, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.allocated * self.config.depth * std::mem::size_of::<Option<T>>()
    }
}

/// An unallocated page table of `width + 1` entries, so that `max_index`
/// itself has a page.
fn empty_table<T>(width: usize) -> Result<Vec<Option<Page<T>>>, CollectionError> {
    let entries = width.saturating_add(1);
    let mut table = Vec::new();
    table
        .try_reserve_exact(entries)
        .map_err(|_| CollectionError::AllocationFailed { slots: entries })?;
    table.resize_with(entries, || None);
    Ok(table)
}

impl<T> SparseList<T> for PagedArray<T> {
    fn get(&self, index: i64) -> Result<&T, CollectionError> {
        let address = self.address(index)?;
        self.slot(address).ok_or_else(|| self.out_of_range(index))
    }

    fn get_mut(&mut self, index: i64) -> Result<&mut T, CollectionError> {
        let address = self.address(index)?;
        let unwritten = self.out_of_range(index);
        let table = match address.sign {
            Sign::Positive => &mut self.positive,
            Sign::Negative => &mut self.negative,
        };
        table[address.page]
            .as_deref_mut()
            .and_then(|page| page[address.offset].as_mut())
            .ok_or(unwritten)
    }

    fn set(&mut self, index: i64, value: T) -> Result<(), CollectionError> {
        let address = self.address(index)?;
        let depth = self.config.depth;
        let table = match address.sign {
            Sign::Positive => &mut self.positive,
            Sign::Negative => &mut self.negative,
        };
        let entry = &mut table[address.page];
        if entry.is_none() {
            log::trace!(
                "allocating {:?} page {} ({depth} slots)",
                address.sign,
                address.page
            );
            self.allocated += 1;
        }
        let page =
            entry.get_or_insert_with(|| std::iter::repeat_with(|| None).take(depth).collect());
        page[address.offset] = Some(value);
        self.bounds.widen(index);
        Ok(())
    }

    fn is_set(&self, index: i64) -> bool {
        self.address(index)
            .is_ok_and(|address| self.slot(address).is_some())
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn position(&self, value: &T) -> Option<i64>
    where
        T: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(i, _)| i)
    }
}

impl<T> Default for PagedArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for PagedArray<T> {
    /// Append each value at `highest + 1`.
    ///
    /// # Panics
    ///
    /// Panics if an append would pass `max_index`.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.add(value) {
                panic!("cannot append past max_index {}: {err}", self.max_index());
            }
        }
    }
}

impl<T> FromIterator<T> for PagedArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<'a, T> IntoIterator for &'a PagedArray<T> {
    type Item = (i64, &'a T);
    type IntoIter = PageCursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
