//! Crate-level test suites.
//!
//! - `scenarios.rs`: hand-placed arenas exercising the tick rules end to end
//! - `determinism.rs`: same seed and commands give the same match
//! - `properties.rs`: invariants over random command sequences
//! - `helpers.rs`: arena builders and small utilities

mod helpers;

pub use helpers::*;
