//! Page table configuration.

use strata_core::CollectionError;

/// Shape of a paged array's page tables.
///
/// `depth` is the number of slots per page and `width` the number of pages
/// per sign, so the addressable range is `[-depth * width, depth * width]`.
/// Validated at construction; the range never grows afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// Slots per page. Must lie in `[MIN_DEPTH, MAX_DEPTH]`.
    pub depth: usize,
    /// Pages per sign. Must be at least 1.
    pub width: usize,
}

impl PageConfig {
    /// Smallest allowed page depth.
    pub const MIN_DEPTH: usize = 2;

    /// Largest allowed page depth.
    pub const MAX_DEPTH: usize = 1024;

    /// Default page depth.
    pub const DEFAULT_DEPTH: usize = 1024;

    /// Largest allowed width: both page tables hold `width + 1` entries and
    /// each must fit in `isize::MAX` bytes.
    pub const MAX_WIDTH: usize =
        isize::MAX as usize / std::mem::size_of::<Option<Box<[()]>>>() - 1;

    /// Default pages per sign. With the default depth the range is
    /// `[-33_554_432, 33_554_432]`.
    pub const DEFAULT_WIDTH: usize = 32_768;

    /// Create a config with the given depth and width.
    pub fn new(depth: usize, width: usize) -> Self {
        Self { depth, width }
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// [`CollectionError::InvalidArgument`] if `depth` lies outside
    /// `[2, 1024]`, `width` is zero or above [`MAX_WIDTH`](Self::MAX_WIDTH),
    /// or `depth * width` does not fit an `i64`.
    pub fn validate(&self) -> Result<(), CollectionError> {
        if !(Self::MIN_DEPTH..=Self::MAX_DEPTH).contains(&self.depth) {
            return Err(CollectionError::InvalidArgument {
                name: "depth",
                reason: format!(
                    "must be in [{}, {}], got {}",
                    Self::MIN_DEPTH,
                    Self::MAX_DEPTH,
                    self.depth
                ),
            });
        }
        if self.width == 0 {
            return Err(CollectionError::InvalidArgument {
                name: "width",
                reason: "must be at least 1".into(),
            });
        }
        if self.width > Self::MAX_WIDTH {
            return Err(CollectionError::InvalidArgument {
                name: "width",
                reason: format!(
                    "must be at most {}, got {}",
                    Self::MAX_WIDTH,
                    self.width
                ),
            });
        }
        if self.checked_max_index().is_none() {
            return Err(CollectionError::InvalidArgument {
                name: "width",
                reason: format!(
                    "depth {} * width {} overflows the index space",
                    self.depth, self.width
                ),
            });
        }
        Ok(())
    }

    /// Highest addressable index, `depth * width`.
    ///
    /// Only meaningful for a validated config.
    pub fn max_index(&self) -> i64 {
        self.checked_max_index().unwrap_or(i64::MAX)
    }

    fn checked_max_index(&self) -> Option<i64> {
        let max = self.depth.checked_mul(self.width)?;
        i64::try_from(max).ok().filter(|&m| m < i64::MAX)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH, Self::DEFAULT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range() {
        let config = PageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_index(), 33_554_432);
    }

    #[test]
    fn depth_bounds_inclusive() {
        assert!(PageConfig::new(2, 1).validate().is_ok());
        assert!(PageConfig::new(1024, 1).validate().is_ok());
        for depth in [0, 1, 1025] {
            assert!(matches!(
                PageConfig::new(depth, 1).validate(),
                Err(CollectionError::InvalidArgument { name: "depth", .. })
            ));
        }
    }

    #[test]
    fn zero_width_rejected() {
        assert!(matches!(
            PageConfig::new(16, 0).validate(),
            Err(CollectionError::InvalidArgument { name: "width", .. })
        ));
    }

    #[test]
    fn unallocatable_width_rejected() {
        let config = PageConfig::new(2, usize::MAX / 4);
        assert!(matches!(
            config.validate(),
            Err(CollectionError::InvalidArgument { name: "width", .. })
        ));
        assert!(PageConfig::new(2, PageConfig::MAX_WIDTH + 1).validate().is_err());
    }

    #[test]
    fn overflowing_width_rejected() {
        assert!(PageConfig::new(1024, usize::MAX / 2).validate().is_err());
    }
}
