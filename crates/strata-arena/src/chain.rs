//! Growable chains of segments.
//!
//! A [`SegmentChain`] owns every [`Segment`] of one collection in a `Vec`
//! and links them by [`SegmentId`]. The root segment starts at index 0.
//! A key outside every existing window is reached by walking links from
//! the root; on write, a missing link is filled by a new neighbour whose
//! capacity is `ceil(capacity * growth_rate)`, placed directly against the
//! window it extends. Growth is never undone.

use strata_core::{Bounds, CollectionError};

use crate::config::SegmentConfig;
use crate::handle::{Direction, SegmentId};
use crate::segment::{Placement, Segment};

/// Arena of linked segments covering a contiguous logical range.
#[derive(Clone, Debug)]
pub struct SegmentChain<T> {
    /// All segments; `segments[0]` is the root.
    segments: Vec<Segment<T>>,
    config: SegmentConfig,
    /// Chain-wide observed bounds (union of every segment's local bounds).
    observed: Bounds,
}

impl<T> SegmentChain<T> {
    /// Create a chain holding one empty root segment.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidArgument`] if `config` fails validation.
    pub fn new(config: SegmentConfig) -> Result<Self, CollectionError> {
        config.validate()?;
        Ok(Self::new_unchecked(config))
    }

    /// Create a chain from a config already known to be valid.
    pub(crate) fn new_unchecked(config: SegmentConfig) -> Self {
        let root = Segment::new(0, config.root_capacity());
        Self {
            segments: vec![root],
            config,
            observed: Bounds::EMPTY,
        }
    }

    /// Find the segment and slot offset owning `key` without growing.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if no existing window covers `key`.
    pub fn locate(&self, key: i64) -> Result<(SegmentId, usize), CollectionError> {
        let mut id = SegmentId::ROOT;
        loop {
            let segment = self.seg(id);
            let direction = match segment.place(key) {
                Placement::Within(offset) => return Ok((id, offset)),
                Placement::Below => Direction::Lower,
                Placement::Above => Direction::Higher,
            };
            id = segment
                .link(direction)
                .ok_or_else(|| self.out_of_range(key))?;
        }
    }

    /// Find the segment and slot offset owning `key`, creating neighbours
    /// along the way as needed.
    fn locate_or_grow(&mut self, key: i64) -> Result<(SegmentId, usize), CollectionError> {
        let mut id = SegmentId::ROOT;
        loop {
            let segment = self.seg(id);
            let direction = match segment.place(key) {
                Placement::Within(offset) => return Ok((id, offset)),
                Placement::Below => Direction::Lower,
                Placement::Above => Direction::Higher,
            };
            id = match segment.link(direction) {
                Some(next) => next,
                None => self.grow(id, direction, key)?,
            };
        }
    }

    /// Append a neighbour of `from` in `direction`.
    fn grow(
        &mut self,
        from: SegmentId,
        direction: Direction,
        key: i64,
    ) -> Result<SegmentId, CollectionError> {
        let segment = self.seg(from);
        let capacity = self.config.next_capacity(segment.capacity());
        let width = capacity as i64;
        let start = match direction {
            // Keep i64::MIN unreachable; it is the index_of sentinel.
            Direction::Lower => segment
                .start()
                .checked_sub(width)
                .filter(|&start| start > i64::MIN),
            Direction::Higher => segment
                .end()
                .checked_add(width)
                .map(|_| segment.end()),
        };
        let start = start.ok_or_else(|| self.out_of_range(key))?;
        let id = u32::try_from(self.segments.len())
            .map(SegmentId)
            .map_err(|_| self.out_of_range(key))?;

        let mut neighbour = Segment::new(start, capacity);
        neighbour.set_link(direction.opposite(), from);
        self.segments.push(neighbour);
        self.segments[from.index()].set_link(direction, id);

        log::debug!(
            "grew {direction:?} neighbour {id} of {from}: start {start}, capacity {capacity}"
        );
        Ok(id)
    }

    /// Read the value at `key`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if no window covers `key`, or
    /// [`CollectionError::NotFound`] if the slot was never written.
    pub fn read(&self, key: i64) -> Result<&T, CollectionError> {
        let (id, offset) = self.locate(key)?;
        self.seg(id)
            .slot(offset)
            .ok_or(CollectionError::NotFound { index: key })
    }

    /// Mutable access to the value at `key`.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_mut(&mut self, key: i64) -> Result<&mut T, CollectionError> {
        let (id, offset) = self.locate(key)?;
        self.segments[id.index()]
            .slot_mut(offset)
            .ok_or(CollectionError::NotFound { index: key })
    }

    /// Write `value` at `key`, growing the chain if needed.
    ///
    /// Returns the previous value at `key`, if any.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfRange`] if reaching `key` would push a
    /// window past the `i64` index space, or
    /// [`CollectionError::AllocationFailed`] if the owning segment's storage
    /// cannot be allocated.
    pub fn write(&mut self, key: i64, value: T) -> Result<Option<T>, CollectionError> {
        let (id, offset) = self.locate_or_grow(key)?;
        let previous = self.segments[id.index()].store(offset, value)?;
        self.observed.widen(key);
        Ok(previous)
    }

    /// Whether a value has been written at `key`.
    pub fn is_set(&self, key: i64) -> bool {
        self.locate(key)
            .is_ok_and(|(id, offset)| self.seg(id).is_set(offset))
    }

    /// Drop every segment and start over with one empty root.
    pub fn clear(&mut self) {
        log::debug!("clearing chain of {} segments", self.segments.len());
        let root = Segment::new(0, self.config.root_capacity());
        self.segments = vec![root];
        self.observed = Bounds::EMPTY;
    }

    /// Chain-wide observed bounds.
    pub fn observed(&self) -> Bounds {
        self.observed
    }

    /// Recompute the chain-wide bounds from each segment's local bounds.
    ///
    /// Always equal to [`observed`](Self::observed); exposed so callers and
    /// tests can check the aggregation.
    pub fn aggregate_observed(&self) -> Bounds {
        self.segments
            .iter()
            .fold(Bounds::EMPTY, |acc, s| acc.union(s.observed()))
    }

    /// Lowest and highest index covered by some window.
    pub fn reachable(&self) -> (i64, i64) {
        let min = self.segments.iter().map(Segment::start).min().unwrap_or(0);
        let max = self.segments.iter().map(Segment::end).max().unwrap_or(0);
        (min, max.saturating_sub(1))
    }

    /// The segment behind `id`, if it belongs to this chain.
    pub fn segment(&self, id: SegmentId) -> Option<&Segment<T>> {
        self.segments.get(id.index())
    }

    pub(crate) fn seg(&self, id: SegmentId) -> &Segment<T> {
        &self.segments[id.index()]
    }

    /// Segment handles ordered from the lowest window to the highest.
    pub fn ordered_ids(&self) -> Vec<SegmentId> {
        let mut lowest = SegmentId::ROOT;
        while let Some(lower) = self.seg(lowest).link(Direction::Lower) {
            lowest = lower;
        }
        let mut ids = Vec::with_capacity(self.segments.len());
        let mut next = Some(lowest);
        while let Some(id) = next {
            ids.push(id);
            next = self.seg(id).link(Direction::Higher);
        }
        ids
    }

    /// Number of segments in the chain.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of written slots across every segment.
    pub fn written(&self) -> usize {
        self.segments.iter().map(Segment::written).sum()
    }

    /// Memory held by allocated segment storage, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.segments.iter().map(Segment::memory_bytes).sum()
    }

    /// The configuration this chain grows by.
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    fn out_of_range(&self, key: i64) -> CollectionError {
        let (min, max) = self.reachable();
        CollectionError::OutOfRange {
            index: key,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> SegmentChain<i32> {
        SegmentChain::new(SegmentConfig::default()).unwrap()
    }

    #[test]
    fn root_covers_zero_to_capacity() {
        let c = chain();
        assert_eq!(c.segment_count(), 1);
        assert_eq!(c.reachable(), (0, 1023));
        assert_eq!(c.locate(1023).unwrap(), (SegmentId::ROOT, 1023));
    }

    #[test]
    fn read_beyond_window_is_out_of_range() {
        let c = chain();
        assert!(matches!(
            c.read(1024),
            Err(CollectionError::OutOfRange { index: 1024, .. })
        ));
        assert!(matches!(
            c.read(-1),
            Err(CollectionError::OutOfRange { index: -1, .. })
        ));
    }

    #[test]
    fn read_unwritten_slot_is_not_found() {
        let mut c = chain();
        c.write(10, 1).unwrap();
        assert!(matches!(
            c.read(11),
            Err(CollectionError::NotFound { index: 11 })
        ));
    }

    #[test]
    fn write_one_past_end_grows_higher() {
        let mut c = chain();
        c.write(1024, 7).unwrap();
        assert_eq!(c.segment_count(), 2);
        let higher = c.seg(SegmentId::ROOT).link(Direction::Higher).unwrap();
        let seg = c.seg(higher);
        assert_eq!(seg.start(), 1024);
        assert_eq!(seg.capacity(), 1280);
        assert_eq!(seg.link(Direction::Lower), Some(SegmentId::ROOT));
    }

    #[test]
    fn write_negative_grows_lower() {
        let mut c = chain();
        c.write(-1, 7).unwrap();
        let lower = c.seg(SegmentId::ROOT).link(Direction::Lower).unwrap();
        let seg = c.seg(lower);
        assert_eq!(seg.start(), -1280);
        assert_eq!(seg.capacity(), 1280);
        assert_eq!(seg.link(Direction::Higher), Some(SegmentId::ROOT));
    }

    #[test]
    fn far_write_builds_intermediate_segments() {
        let mut c = chain();
        c.write(10_000, 1).unwrap();
        // 1024 + 1280 + 1600 + 2000 + 2500 = 8404, next 3125 covers 10_000.
        assert_eq!(c.segment_count(), 6);
        assert_eq!(*c.read(10_000).unwrap(), 1);
        // Bridging segments stay unallocated.
        let allocated = c.segments.iter().filter(|s| s.is_allocated()).count();
        assert_eq!(allocated, 1);
    }

    #[test]
    fn growth_preserves_existing_values() {
        let mut c = chain();
        c.write(0, 0).unwrap();
        c.write(1023, 1023).unwrap();
        c.write(5000, 5000).unwrap();
        c.write(-5000, -5000).unwrap();
        for k in [0, 1023, 5000, -5000] {
            assert_eq!(*c.read(k).unwrap(), k as i32);
        }
    }

    #[test]
    fn observed_matches_aggregate_of_local_bounds() {
        let mut c = chain();
        for k in [3, -700, 9000, 12, -3000] {
            c.write(k, 0).unwrap();
        }
        assert_eq!(c.observed(), c.aggregate_observed());
        assert_eq!(c.observed().lowest(), -3000);
        assert_eq!(c.observed().highest(), 9000);
    }

    #[test]
    fn ordered_ids_walk_low_to_high() {
        let mut c = chain();
        c.write(-1, 0).unwrap();
        c.write(3000, 0).unwrap();
        let starts: Vec<i64> = c
            .ordered_ids()
            .into_iter()
            .map(|id| c.seg(id).start())
            .collect();
        assert_eq!(starts, vec![-1280, 0, 1024, 2304]);
    }

    #[test]
    fn clear_resets_to_single_root() {
        let mut c = chain();
        c.write(-5000, 1).unwrap();
        c.write(5000, 1).unwrap();
        c.clear();
        assert_eq!(c.segment_count(), 1);
        assert!(c.observed().is_empty());
        assert!(matches!(
            c.read(5000),
            Err(CollectionError::OutOfRange { .. })
        ));
        assert_eq!(c.memory_bytes(), 0);
    }

    #[test]
    fn custom_growth_rate_applies_per_instance() {
        let config = SegmentConfig::new(1024).with_growth_rate(2.0);
        let mut doubling: SegmentChain<u8> = SegmentChain::new(config).unwrap();
        let mut default = chain();
        doubling.write(1024, 1).unwrap();
        default.write(1024, 1).unwrap();
        fn cap<T>(c: &SegmentChain<T>) -> usize {
            let id = c.seg(SegmentId::ROOT).link(Direction::Higher).unwrap();
            c.seg(id).capacity()
        }
        assert_eq!(cap(&doubling), 2048);
        assert_eq!(cap(&default), 1280);
    }

    #[test]
    fn write_near_i64_min_is_out_of_range() {
        let config = SegmentConfig::new(1024).with_growth_rate(1_000_000.0);
        let mut c: SegmentChain<u8> = SegmentChain::new(config).unwrap();
        let err = c.write(i64::MIN, 1).unwrap_err();
        assert!(matches!(err, CollectionError::OutOfRange { .. }));
    }
}
