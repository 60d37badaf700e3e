//! Test utilities
//!
//! Manual in-memory implementations of the port traits plus fixtures.
//! Mocks are hand-written: they stay explicit, shareable between tests via
//! `Clone`, and free of macro-generated lifetimes.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
