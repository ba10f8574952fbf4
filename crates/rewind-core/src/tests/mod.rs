//! Crate-level tests that drive the full round controller.
//!
//! - `determinism.rs`: identical inputs give bit-identical state
//! - `integration.rs`: end-to-end duel scenarios
//! - `properties.rs`: invariants over random input streams
//! - `helpers.rs`: input generators and setup utilities

mod determinism;
mod helpers;
mod properties;

pub use helpers::*;
