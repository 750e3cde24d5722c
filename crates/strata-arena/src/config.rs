//! Segment chain configuration parameters.

use strata_core::CollectionError;

/// Configuration for a segment chain.
///
/// Controls the root segment's capacity, the floor applied to every
/// segment's capacity, and the growth factor used when a neighbour is
/// created. Each collection carries its own copy; nothing is shared
/// between instances.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentConfig {
    /// Requested capacity of the root segment, in slots.
    ///
    /// Values below [`min_capacity`](Self::min_capacity) are silently
    /// raised to it.
    pub initial_capacity: usize,

    /// Smallest capacity any segment may have.
    ///
    /// Default: 1024.
    pub min_capacity: usize,

    /// Multiplier applied to a segment's capacity when creating its
    /// lower or higher neighbour. The result is rounded up.
    ///
    /// Default: 1.25. Must be finite and greater than 1.
    pub growth_rate: f64,
}

impl SegmentConfig {
    /// Default floor for segment capacity.
    pub const DEFAULT_MIN_CAPACITY: usize = 1024;

    /// Default neighbour growth factor.
    pub const DEFAULT_GROWTH_RATE: f64 = 1.25;

    /// Largest capacity any segment is given. A window this wide starting
    /// at 0 ends exactly at `i64::MAX`.
    pub const MAX_CAPACITY: usize = i64::MAX as usize;

    /// Create a config whose root segment requests `initial_capacity`
    /// slots. Other parameters take their defaults.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            growth_rate: Self::DEFAULT_GROWTH_RATE,
        }
    }

    /// Set the growth rate.
    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    /// Set the minimum segment capacity.
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidArgument`] if `min_capacity` is zero or
    /// does not fit an `i64` index, or if `growth_rate` is not a finite
    /// number greater than 1.
    pub fn validate(&self) -> Result<(), CollectionError> {
        if self.min_capacity == 0 || i64::try_from(self.min_capacity).is_err() {
            return Err(CollectionError::InvalidArgument {
                name: "min_capacity",
                reason: format!("must be in [1, i64::MAX], got {}", self.min_capacity),
            });
        }
        if !self.growth_rate.is_finite() || self.growth_rate <= 1.0 {
            return Err(CollectionError::InvalidArgument {
                name: "growth_rate",
                reason: format!("must be finite and > 1.0, got {}", self.growth_rate),
            });
        }
        Ok(())
    }

    /// Root segment capacity after applying the minimum, clamped to
    /// [`MAX_CAPACITY`](Self::MAX_CAPACITY).
    pub fn root_capacity(&self) -> usize {
        self.initial_capacity
            .max(self.min_capacity)
            .min(Self::MAX_CAPACITY)
    }

    /// Capacity of a neighbour grown from a segment of `capacity` slots:
    /// `ceil(capacity * growth_rate)`, never below the minimum and never
    /// above [`MAX_CAPACITY`](Self::MAX_CAPACITY).
    pub fn next_capacity(&self, capacity: usize) -> usize {
        // Float-to-int casts saturate.
        let grown = (capacity as f64 * self.growth_rate).ceil() as usize;
        grown
            .max(capacity.saturating_add(1))
            .max(self.min_capacity)
            .min(Self::MAX_CAPACITY)
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root_is_1024() {
        assert_eq!(SegmentConfig::default().root_capacity(), 1024);
    }

    #[test]
    fn small_capacity_raised_to_minimum() {
        assert_eq!(SegmentConfig::new(10).root_capacity(), 1024);
        assert_eq!(SegmentConfig::new(5000).root_capacity(), 5000);
    }

    #[test]
    fn next_capacity_rounds_up() {
        let config = SegmentConfig::default();
        assert_eq!(config.next_capacity(1024), 1280);
        assert_eq!(config.next_capacity(1280), 1600);
        // 1025 * 1.25 = 1281.25
        assert_eq!(config.next_capacity(1025), 1282);
    }

    #[test]
    fn next_capacity_always_grows() {
        let config = SegmentConfig::new(1)
            .with_min_capacity(1)
            .with_growth_rate(1.01);
        assert_eq!(config.next_capacity(1), 2);
    }

    #[test]
    fn capacities_clamp_to_index_space() {
        assert_eq!(
            SegmentConfig::new(SegmentConfig::MAX_CAPACITY.saturating_add(1)).root_capacity(),
            SegmentConfig::MAX_CAPACITY
        );
        assert_eq!(
            SegmentConfig::new(usize::MAX).root_capacity(),
            SegmentConfig::MAX_CAPACITY
        );
        let config = SegmentConfig::default();
        assert_eq!(
            config.next_capacity(SegmentConfig::MAX_CAPACITY),
            SegmentConfig::MAX_CAPACITY
        );
        assert_eq!(
            config.next_capacity(usize::MAX),
            SegmentConfig::MAX_CAPACITY
        );
        assert!(i64::try_from(config.next_capacity(SegmentConfig::MAX_CAPACITY / 2)).is_ok());
    }

    #[test]
    fn growth_rate_must_exceed_one() {
        for rate in [1.0, 0.5, f64::NAN, f64::INFINITY] {
            let config = SegmentConfig::default().with_growth_rate(rate);
            assert!(matches!(
                config.validate(),
                Err(CollectionError::InvalidArgument {
                    name: "growth_rate",
                    ..
                })
            ));
        }
    }

    #[test]
    fn zero_min_capacity_rejected() {
        let config = SegmentConfig::default().with_min_capacity(0);
        assert!(config.validate().is_err());
    }
}
