//! Shared utilities.
//!
//! Content hashing plus test helpers that stand in for the real toolchain.

pub mod hash;

#[cfg(all(unix, any(test, feature = "testutil")))]
pub mod testutil;
