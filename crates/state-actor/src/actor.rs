//! # Generic Actor Server
//!
//! This module defines the `StateActor`, the component that owns a single piece of state and
//! applies requests to it sequentially. It implements the "Server" side of the Actor Model.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns one `ActorState`.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state and the receiver end of the
/// channel.
///
/// **Concurrency Model**:
/// Any number of `StateClient` clones may send requests concurrently, but the actor applies them
/// one at a time in a single loop. Each command is therefore a critical section that covers the
/// whole read-then-write decision it makes; there is no `Mutex` around the state to get wrong.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StateActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use state_actor::{ActorState, StateActor};
/// use async_trait::async_trait;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("counter error")]
/// struct CounterError;
///
/// struct Counter(u64);
///
/// #[async_trait]
/// impl ActorState for Counter {
///     type Command = u64;
///     type Outcome = u64;
///     type Query = ();
///     type View = u64;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn handle_command(&mut self, by: u64, _: &()) -> Result<u64, CounterError> {
///         self.0 += by;
///         Ok(self.0)
///     }
///     async fn handle_query(&self, _: (), _: &()) -> Result<u64, CounterError> {
///         Ok(self.0)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StateActor::new(Counter(0), 10);
///     let handle = tokio::spawn(actor.run(()));
///
///     assert_eq!(client.command(5).await.unwrap(), 5);
///     assert_eq!(client.query(()).await.unwrap(), 5);
///
///     drop(client);
///     let counter = handle.await.unwrap();
///     assert_eq!(counter.0, 5);
/// }
/// ```
pub struct StateActor<S: ActorState> {
    receiver: mpsc::Receiver<StateRequest<S>>,
    state: S,
}

impl<S: ActorState> StateActor<S> {
    /// Creates a new `StateActor` around `state` and its associated `StateClient`.
    ///
    /// # Arguments
    ///
    /// * `state` - The initial state, moved into the actor.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full, calls to the
    ///   client wait until there is space.
    pub fn new(state: S, buffer_size: usize) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        let client = StateClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped, then returns the
    /// final state.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every hook. This allows the state to reach
    /// dependencies that were created *after* the actor was instantiated.
    pub async fn run(mut self, context: S::Context) -> S {
        // Extract just the type name (e.g., "ShelfSet" instead of "kitchen_sim::shelf_set::ShelfSet")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");

        if let Err(e) = self.state.on_start(&context).await {
            warn!(state_type, error = %e, "on_start failed");
        }

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Command {
                    command,
                    respond_to,
                } => {
                    debug!(state_type, ?command, "Command");
                    let result = self
                        .state
                        .handle_command(command, &context)
                        .await
                        .map_err(|e| FrameworkError::StateError(Box::new(e)));
                    if let Err(e) = &result {
                        warn!(state_type, error = %e, "Command failed");
                    }
                    let _ = respond_to.send(result);
                }
                StateRequest::Query { query, respond_to } => {
                    debug!(state_type, ?query, "Query");
                    let result = self
                        .state
                        .handle_query(query, &context)
                        .await
                        .map_err(|e| FrameworkError::StateError(Box::new(e)));
                    let _ = respond_to.send(result);
                }
            }
        }

        self.state.on_stop(&context).await;
        info!(state_type, "Shutdown");
        self.state
    }
}
