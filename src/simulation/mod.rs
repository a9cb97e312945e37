//! # Simulation
//!
//! The moving parts around the shelves: logical time, randomness, the arrival process and
//! courier dispatch. Time and randomness are traits so tests can run the whole kitchen on a
//! paused Tokio runtime with seeded draws.
//!
//! - [`clock`] - [`Clock`], [`TokioClock`], [`ManualClock`]
//! - [`random`] - [`Randomness`], [`ThreadRandom`], [`SeededRandom`]
//! - [`arrival`] - the ticking order source
//! - [`pickup`] - one courier timer per accepted order

pub mod arrival;
pub mod clock;
pub mod pickup;
pub mod random;

pub use arrival::{ArrivalHandle, OrderSink};
pub use clock::*;
pub use pickup::{PickupDispatcher, PickupScheduler};
pub use random::*;
