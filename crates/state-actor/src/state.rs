//! # ActorState Trait
//!
//! The `ActorState` trait defines the contract for any piece of mutable state that must be
//! owned by exactly one writer. A `StateActor` holds the state inside its own Tokio task and
//! applies requests to it one at a time, so every command is atomic by construction.
//!
//! # Architecture Note
//! Requests come in two flavours:
//! - **Commands** read and write the state (`&mut self`). A command is the unit of atomicity:
//!   whatever it checks and whatever it changes happens without any other request interleaving.
//! - **Queries** only read the state (`&self`).
//!
//! We use "Associated Types" (type Command, type Outcome, etc.) to enforce type safety.
//! A shelf actor only accepts shelf commands, and the compiler rejects anything else.
//!
//! # Provided Methods (Hooks)
//! - [`ActorState::on_start`]
//! - [`ActorState::on_stop`]
//!
//! The default implementations do nothing.

use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any state must implement to be owned by a [`StateActor`](crate::StateActor).
///
/// # Async & Context
/// This trait is `#[async_trait]` so handlers may await other actors. The `Context` type is
/// injected into every hook at `run()` time rather than at construction time ("Late Binding"),
/// which lets dependencies such as clocks or other clients be wired after the actor exists.
#[async_trait]
pub trait ActorState: Send + Sync + 'static {
    /// A mutating request (e.g. `Submit`, `Pickup`).
    type Command: Send + Debug;

    /// The result of a command.
    type Outcome: Send + Debug;

    /// A read-only request.
    type Query: Send + Debug;

    /// The result of a query.
    type View: Send + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this state.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per state rather than one per command. Clients deal with a single error
    /// type, at the cost of every command nominally being able to return every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the first request is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a command to the state.
    async fn handle_command(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Outcome, Self::Error>;

    /// Answer a query without mutating the state.
    async fn handle_query(
        &self,
        query: Self::Query,
        ctx: &Self::Context,
    ) -> Result<Self::View, Self::Error>;

    /// Called once after the last client is dropped, before the actor returns.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}
