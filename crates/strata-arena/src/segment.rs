//! Fixed windows over the logical index space.
//!
//! A [`Segment`] covers `[start, start + capacity)`. Its storage is a boxed
//! slice of `Option<T>` allocated on the first write, so a segment that
//! only exists to bridge a gap costs a few words of bookkeeping.

use strata_core::{Bounds, CollectionError};

use crate::handle::{Direction, SegmentId};

/// One window of a segment chain.
///
/// Slots are `Option<T>`: `None` means never written. Neighbour links are
/// handles into the owning [`SegmentChain`](crate::chain::SegmentChain).
#[derive(Clone, Debug)]
pub struct Segment<T> {
    /// Logical index of slot 0.
    start: i64,
    /// Number of slots in the window.
    capacity: usize,
    /// Backing storage, allocated on first write.
    slots: Option<Box<[Option<T>]>>,
    lower: Option<SegmentId>,
    higher: Option<SegmentId>,
    /// Indices written into this segment only.
    observed: Bounds,
    /// Number of `Some` slots.
    written: usize,
}

/// Where a key falls relative to a segment's window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Below `start`.
    Below,
    /// Within the window, at the given slot offset.
    Within(usize),
    /// At or above `start + capacity`.
    Above,
}

impl<T> Segment<T> {
    /// Create an unallocated segment covering `[start, start + capacity)`.
    ///
    /// `start + capacity` must not overflow `i64`; the chain checks this
    /// before constructing neighbours.
    pub fn new(start: i64, capacity: usize) -> Self {
        Self {
            start,
            capacity,
            slots: None,
            lower: None,
            higher: None,
            observed: Bounds::EMPTY,
            written: 0,
        }
    }

    /// Classify `key` against this window.
    pub fn place(&self, key: i64) -> Placement {
        if key < self.start {
            Placement::Below
        } else if key >= self.end() {
            Placement::Above
        } else {
            Placement::Within(key.abs_diff(self.start) as usize)
        }
    }

    /// The value at `offset`, if written.
    pub fn slot(&self, offset: usize) -> Option<&T> {
        self.slots.as_ref()?.get(offset)?.as_ref()
    }

    /// Mutable access to the value at `offset`, if written.
    pub fn slot_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.slots.as_mut()?.get_mut(offset)?.as_mut()
    }

    /// Store `value` at `offset`, allocating storage on first use.
    ///
    /// Returns the previous value, if any.
    ///
    /// # Errors
    ///
    /// [`CollectionError::AllocationFailed`] if the window's storage cannot
    /// be allocated. The segment is left unallocated.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= capacity`.
    pub fn store(&mut self, offset: usize, value: T) -> Result<Option<T>, CollectionError> {
        let slots = match self.slots.take() {
            Some(slots) => slots,
            None => allocate_slots(self.start, self.capacity)?,
        };
        let slots = self.slots.insert(slots);
        let previous = slots[offset].replace(value);
        if previous.is_none() {
            self.written += 1;
        }
        self.observed.widen(self.start + offset as i64);
        Ok(previous)
    }

    /// Whether a value has been written at `offset`.
    pub fn is_set(&self, offset: usize) -> bool {
        self.slot(offset).is_some()
    }

    /// Logical index of slot 0.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Logical index one past the last slot, saturating at `i64::MAX`.
    pub fn end(&self) -> i64 {
        let width = i64::try_from(self.capacity).unwrap_or(i64::MAX);
        self.start.saturating_add(width)
    }

    /// Number of slots in the window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether backing storage has been allocated.
    pub fn is_allocated(&self) -> bool {
        self.slots.is_some()
    }

    /// Number of written slots.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bounds of the indices written into this segment.
    ///
    /// These are local to the segment; the chain aggregates them.
    pub fn observed(&self) -> Bounds {
        self.observed
    }

    /// Neighbour handle in `direction`, if one has been created.
    pub fn link(&self, direction: Direction) -> Option<SegmentId> {
        match direction {
            Direction::Lower => self.lower,
            Direction::Higher => self.higher,
        }
    }

    pub(crate) fn set_link(&mut self, direction: Direction, id: SegmentId) {
        match direction {
            Direction::Lower => self.lower = Some(id),
            Direction::Higher => self.higher = Some(id),
        }
    }

    /// Memory held by the backing storage, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.slots
            .as_ref()
            .map_or(0, |s| s.len() * std::mem::size_of::<Option<T>>())
    }
}

/// Allocate `capacity` empty slots, failing instead of aborting when the
/// request cannot be satisfied.
fn allocate_slots<T>(start: i64, capacity: usize) -> Result<Box<[Option<T>]>, CollectionError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| CollectionError::AllocationFailed { slots: capacity })?;
    log::trace!("allocating {capacity} slots at start {start}");
    slots.resize_with(capacity, || None);
    Ok(slots.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_segment_is_unallocated() {
        let seg: Segment<u32> = Segment::new(0, 1024);
        assert!(!seg.is_allocated());
        assert_eq!(seg.memory_bytes(), 0);
        assert!(seg.observed().is_empty());
        assert_eq!(seg.slot(0), None);
    }

    #[test]
    fn place_classifies_window_edges() {
        let seg: Segment<u32> = Segment::new(-1280, 1280);
        assert_eq!(seg.place(-1281), Placement::Below);
        assert_eq!(seg.place(-1280), Placement::Within(0));
        assert_eq!(seg.place(-1), Placement::Within(1279));
        assert_eq!(seg.place(0), Placement::Above);
    }

    #[test]
    fn store_allocates_lazily() {
        let mut seg = Segment::new(100, 1024);
        assert_eq!(seg.store(5, "a"), Ok(None));
        assert!(seg.is_allocated());
        assert_eq!(seg.slot(5), Some(&"a"));
        assert!(!seg.is_set(6));
        assert_eq!(seg.observed(), Bounds::single(105));
    }

    #[test]
    fn overwrite_returns_previous_and_keeps_count() {
        let mut seg = Segment::new(0, 1024);
        seg.store(3, 1).unwrap();
        assert_eq!(seg.store(3, 2), Ok(Some(1)));
        assert_eq!(seg.written(), 1);
        assert_eq!(seg.slot(3), Some(&2));
    }

    #[test]
    fn observed_bounds_are_local() {
        let mut seg = Segment::new(1024, 1280);
        seg.store(0, 'x').unwrap();
        seg.store(100, 'y').unwrap();
        let b = seg.observed();
        assert_eq!(b.lowest(), 1024);
        assert_eq!(b.highest(), 1124);
    }

    #[test]
    fn slot_mut_updates_in_place() {
        let mut seg = Segment::new(0, 1024);
        seg.store(0, 10).unwrap();
        *seg.slot_mut(0).unwrap() += 5;
        assert_eq!(seg.slot(0), Some(&15));
        assert!(seg.slot_mut(1).is_none());
    }

    #[test]
    fn unallocatable_window_fails_cleanly() {
        let mut seg = Segment::new(0, i64::MAX as usize);
        assert_eq!(
            seg.store(0, 1u64),
            Err(CollectionError::AllocationFailed {
                slots: i64::MAX as usize
            })
        );
        assert!(!seg.is_allocated());
        assert_eq!(seg.written(), 0);
        assert!(seg.observed().is_empty());
    }

    #[test]
    fn end_saturates_for_oversized_capacity() {
        let seg: Segment<u8> = Segment::new(10, usize::MAX);
        assert_eq!(seg.end(), i64::MAX);
        assert_eq!(seg.place(5), Placement::Below);
        assert_eq!(seg.place(20), Placement::Within(10));
    }

    #[test]
    fn links_start_empty() {
        let mut seg: Segment<()> = Segment::new(0, 1024);
        assert_eq!(seg.link(Direction::Lower), None);
        seg.set_link(Direction::Higher, SegmentId(3));
        assert_eq!(seg.link(Direction::Higher), Some(SegmentId(3)));
    }
}
