//! # Shelf Set
//!
//! The kitchen's storage, run as a single-writer actor.
//!
//! ## Structure
//!
//! - [`policy`] - [`ShelfSet`]: placement, promotion, eviction and waste
//! - [`actions`] - [`ShelfCommand`] / [`ShelfQuery`] and their replies
//! - [`state`] - [`ActorState`](state_actor::ActorState) implementation for [`ShelfSet`]
//! - [`error`] - [`ShelfError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use kitchen_sim::config::ShelfConfig;
//! use kitchen_sim::metrics::NoopMetrics;
//! use kitchen_sim::model::{Order, Temperature};
//! use kitchen_sim::shelf_set;
//! use kitchen_sim::simulation::{Clock, TokioClock};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = shelf_set::new(&ShelfConfig::default(), Arc::new(NoopMetrics));
//!     let clock: Arc<dyn Clock> = Arc::new(TokioClock::new());
//!     tokio::spawn(actor.run(clock));
//!
//!     let outcome = client
//!         .submit(Order::new("Ramen", Temperature::Hot, 500, 0.45))
//!         .await?;
//!     assert!(outcome.is_shelved());
//!     assert_eq!(client.size().await?, 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod error;
pub mod policy;
pub mod state;

pub use actions::*;
pub use error::*;
pub use policy::*;

use crate::clients::ShelfClient;
use crate::config::ShelfConfig;
use crate::metrics::MetricsSink;
use state_actor::StateActor;
use std::sync::Arc;

/// Creates the Shelf Set actor and its client.
pub fn new(
    config: &ShelfConfig,
    metrics: Arc<dyn MetricsSink>,
) -> (StateActor<ShelfSet>, ShelfClient) {
    let (actor, inner) = StateActor::new(ShelfSet::new(config, metrics), 32);
    (actor, ShelfClient::new(inner))
}
