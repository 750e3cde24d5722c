//! Test utilities and fixtures for Strata development.
//!
//! Provides deterministic data sets for the sparse list and map tests,
//! plus [`init_logging`] so `RUST_LOG=debug cargo test` shows segment
//! growth and page allocation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    comparison_sets, index_cases, range_cases, scattered_keys, IndexCase, RangeCase,
};

/// Install `env_logger` for the current test binary.
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
    log::trace!("test logging initialised");
}
