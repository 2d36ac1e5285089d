//! Utility functions for rule implementations.

pub mod packages;

#[doc(inline)]
pub use packages::{package_matches, package_matches_any};
