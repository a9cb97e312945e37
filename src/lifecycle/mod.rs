//! # Lifecycle
//!
//! Wiring and shutdown of the running simulation. [`Kitchen`] owns every task: the Shelf Set
//! actor, the arrival ticker and the pickup dispatcher.

pub mod kitchen;

pub use kitchen::*;
