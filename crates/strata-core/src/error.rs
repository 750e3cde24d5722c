//! Error taxonomy for Strata collections.

use std::error::Error;
use std::fmt;

/// Errors returned by sparse lists and the ordered concurrent map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionError {
    /// The index lies outside every reachable window (segmented chain) or
    /// outside the fixed `[min, max]` range (paged table).
    OutOfRange {
        /// The requested logical index.
        index: i64,
        /// Lowest addressable index at the time of the request.
        min: i64,
        /// Highest addressable index at the time of the request.
        max: i64,
    },
    /// The slot is addressable but has never been written.
    NotFound {
        /// The requested logical index.
        index: i64,
    },
    /// The operation would renumber existing slots, or reconfigure the
    /// collection outside its valid bounds.
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// A construction parameter failed validation.
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Backing storage for a segment could not be allocated.
    AllocationFailed {
        /// Number of slots requested.
        slots: usize,
    },
    /// Keyed lookup of a key that is not present in the map.
    KeyNotFound,
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, min, max } => {
                write!(f, "index {index} out of range [{min}, {max}]")
            }
            Self::NotFound { index } => write!(f, "no value is set at index {index}"),
            Self::Unsupported { operation } => {
                write!(f, "{operation} is not supported: indices are permanent")
            }
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument '{name}': {reason}")
            }
            Self::AllocationFailed { slots } => {
                write!(f, "cannot allocate storage for {slots} slots")
            }
            Self::KeyNotFound => write!(f, "key not found"),
        }
    }
}

impl Error for CollectionError {}
