//! # State Actor
//!
//! This crate provides a single-writer actor for state that many concurrent tasks need to read
//! and modify. Instead of sharing the state behind a lock, the state is moved into a Tokio task
//! and every change is requested through a message. Requests are applied one at a time, so each
//! one is atomic by construction.
//!
//! ## Why an Actor instead of a Mutex?
//!
//! With a lock, atomicity depends on discipline: a caller that checks a condition under one
//! acquisition and acts on it under another has a race, and nothing in the types prevents it.
//! With an actor, the unit of atomicity is the message. If a decision and its effect belong to
//! the same command, no other request can observe or interleave with the intermediate state.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Foundational concurrency pattern by Carl Hewitt
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`ActorState`]) - Your business logic: commands, queries and hooks
//! 2. **Runtime Layer** ([`StateActor`]) - Message processing and ownership of the state
//! 3. **Interface Layer** ([`StateClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Bounded Waits
//!
//! [`StateClient::query_within`] and [`StateClient::command_within`] give up after a timeout
//! and return [`FrameworkError::Timeout`]. Periodic tasks use them to defer a decision to their
//! next tick instead of blocking behind a busy actor.
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that answers requests from scripted expectations,
//! for testing code that talks to an actor without running one.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StateActor;
pub use client::StateClient;
pub use client_trait::ActorClient;
pub use error::FrameworkError;
pub use message::{Response, StateRequest};
pub use state::ActorState;
