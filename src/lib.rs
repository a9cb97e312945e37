//! # Kitchen Simulation
//!
//! A kitchen receives perishable orders at random intervals, keeps them on capacity-limited
//! shelves where they lose value over time, and hands them to couriers that arrive after a
//! random delay. Orders that reach zero value are thrown away.
//!
//! ## Storage
//!
//! There is one primary shelf per [`Temperature`](model::Temperature) and one shared Overflow
//! shelf on which orders decay faster (see [`value`]). When a primary shelf is full, orders go to
//! Overflow; when Overflow is full too, the kitchen rescues an Overflow order whose primary shelf
//! has room, or evicts the Overflow order with the lowest value. A slot freed on a primary shelf
//! is refilled from Overflow with the matching order closest to spoiling.
//!
//! ## Concurrency
//!
//! The shelves are owned by a single-writer actor from the `state-actor` crate. The arrival
//! ticker and the courier timers all talk to it through a [`ShelfClient`](clients::ShelfClient),
//! and every placement, promotion, eviction or pickup is one message, applied atomically.
//!
//! ## Module Tour
//!
//! - [`model`]: orders, placement records and logical time
//! - [`value`]: the freshness formula
//! - [`shelf`]: a single capacity-bounded tier
//! - [`shelf_set`]: the placement policy and its actor
//! - [`clients`]: the typed client for the Shelf Set actor
//! - [`simulation`]: clocks, randomness, arrivals and pickups
//! - [`lifecycle`]: the [`Kitchen`](lifecycle::Kitchen) that wires it all together
//! - [`source`], [`config`], [`metrics`]: input, settings and counters
//!
//! ## Example
//!
//! ```rust
//! use kitchen_sim::config::KitchenConfig;
//! use kitchen_sim::lifecycle::Kitchen;
//! use kitchen_sim::model::{Order, Temperature};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = KitchenConfig::default();
//!     config.seed = Some(7);
//!     config.pickup.min_delay_ms = 10;
//!     config.pickup.max_delay_ms = 20;
//!     config.arrival.tick_ms = 1;
//!     config.arrival.rate_per_second = 1000.0;
//!     config.arrival.grace_ms = 5;
//!
//!     let mut kitchen = Kitchen::new(config)?;
//!     kitchen.start(vec![Order::new("Ramen", Temperature::Hot, 500, 0.45)])?;
//!     kitchen.run_until_done().await?;
//!
//!     let metrics = kitchen.shutdown().await?;
//!     assert_eq!(metrics.submitted, 1);
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod model;
pub mod shelf;
pub mod shelf_set;
pub mod simulation;
pub mod source;
pub mod value;

pub use error::KitchenError;
