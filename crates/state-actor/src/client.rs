//! # Generic Client
//!
//! This module defines the generic client for communicating with a `StateActor`.

use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::ActorState;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// ## StateClient
///
/// The `StateClient<S>` provides a type-safe, async API for talking to a `StateActor<S>`. It
/// forwards commands and queries over a Tokio mpsc channel and receives results via oneshot
/// channels.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Bounded waits** – the `*_within` variants give up after a timeout instead of blocking.
pub struct StateClient<S: ActorState> {
    sender: mpsc::Sender<StateRequest<S>>,
}

impl<S: ActorState> Clone for StateClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: ActorState> StateClient<S> {
    pub fn new(sender: mpsc::Sender<StateRequest<S>>) -> Self {
        Self { sender }
    }

    pub async fn command(&self, command: S::Command) -> Result<S::Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Command {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn query(&self, query: S::Query) -> Result<S::View, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Query { query, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Sends a command only if a slot in the actor's queue can be reserved within `timeout`.
    ///
    /// Once the command is enqueued it is always applied, so the reply is awaited without a
    /// bound. A `Timeout` error therefore guarantees the command was never sent.
    pub async fn command_within(
        &self,
        command: S::Command,
        timeout: Duration,
    ) -> Result<S::Outcome, FrameworkError> {
        let permit = match tokio::time::timeout(timeout, self.sender.reserve()).await {
            Ok(permit) => permit.map_err(|_| FrameworkError::ActorClosed)?,
            Err(_) => return Err(FrameworkError::Timeout(timeout)),
        };
        let (respond_to, response) = oneshot::channel();
        permit.send(StateRequest::Command {
            command,
            respond_to,
        });
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Runs a query, giving up if the full round trip takes longer than `timeout`.
    pub async fn query_within(
        &self,
        query: S::Query,
        timeout: Duration,
    ) -> Result<S::View, FrameworkError> {
        tokio::time::timeout(timeout, self.query(query))
            .await
            .map_err(|_| FrameworkError::Timeout(timeout))?
    }

    /// True once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
