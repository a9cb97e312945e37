//! Type-safe wrappers around [`StateClient`](state_actor::StateClient).

pub mod shelf_client;

pub use shelf_client::*;
