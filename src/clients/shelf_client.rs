//! # Shelf Client
//!
//! High-level API for the Shelf Set actor. Wraps a `StateClient<ShelfSet>` and unpacks replies
//! into the shapes each operation promises.
use crate::model::{Order, OrderId, ShelvedOrder, Temperature};
use crate::shelf_set::{
    PickupOutcome, ShelfCommand, ShelfError, ShelfOutcome, ShelfQuery, ShelfReport, ShelfSet,
    ShelfSnapshot, SubmitOutcome,
};
use async_trait::async_trait;
use state_actor::{ActorClient, FrameworkError, StateClient};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the Shelf Set actor. Cloning is cheap; every clone talks to the same shelves.
#[derive(Clone)]
pub struct ShelfClient {
    inner: StateClient<ShelfSet>,
}

impl ShelfClient {
    pub fn new(inner: StateClient<ShelfSet>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order), fields(name = %order.name, temperature = %order.temperature))]
    pub async fn submit(&self, order: Order) -> Result<SubmitOutcome, ShelfError> {
        match self.send_command(ShelfCommand::Submit(order)).await? {
            ShelfOutcome::Submitted(outcome) => Ok(outcome),
            _ => Err(ShelfError::UnexpectedReply("submit")),
        }
    }

    #[instrument(skip(self))]
    pub async fn pickup(&self, id: OrderId) -> Result<PickupOutcome, ShelfError> {
        match self.send_command(ShelfCommand::Pickup(id)).await? {
            ShelfOutcome::PickedUp(outcome) => Ok(outcome),
            _ => Err(ShelfError::UnexpectedReply("pickup")),
        }
    }

    #[instrument(skip(self))]
    pub async fn promote(
        &self,
        temperature: Temperature,
    ) -> Result<Option<ShelvedOrder>, ShelfError> {
        match self.send_command(ShelfCommand::Promote(temperature)).await? {
            ShelfOutcome::Promoted(promoted) => Ok(promoted),
            _ => Err(ShelfError::UnexpectedReply("promote")),
        }
    }

    /// Sweeps waste from every shelf; returns how many orders were thrown away.
    #[instrument(skip(self))]
    pub async fn sweep(&self) -> Result<usize, ShelfError> {
        match self.send_command(ShelfCommand::Sweep).await? {
            ShelfOutcome::Swept(count) => Ok(count),
            _ => Err(ShelfError::UnexpectedReply("sweep")),
        }
    }

    pub async fn size(&self) -> Result<usize, ShelfError> {
        match self.send_query(ShelfQuery::Size).await? {
            ShelfReport::Size(size) => Ok(size),
            _ => Err(ShelfError::UnexpectedReply("size")),
        }
    }

    pub async fn snapshot(&self) -> Result<ShelfSnapshot, ShelfError> {
        match self.send_query(ShelfQuery::Snapshot).await? {
            ShelfReport::Snapshot(snapshot) => Ok(snapshot),
            _ => Err(ShelfError::UnexpectedReply("snapshot")),
        }
    }

    /// Whether every shelf is empty, or `None` if the actor did not answer within `timeout`.
    pub async fn is_empty_within(&self, timeout: Duration) -> Result<Option<bool>, ShelfError> {
        match self.inner.query_within(ShelfQuery::Size, timeout).await {
            Ok(ShelfReport::Size(size)) => Ok(Some(size == 0)),
            Ok(_) => Err(ShelfError::UnexpectedReply("size")),
            Err(e) if e.is_timeout() => {
                debug!(?timeout, "Shelf size check deferred");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Shelf size check failed");
                Err(Self::map_error(e))
            }
        }
    }
}

#[async_trait]
impl ActorClient<ShelfSet> for ShelfClient {
    type Error = ShelfError;

    fn inner(&self) -> &StateClient<ShelfSet> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if e.is_timeout() {
            ShelfError::Timeout
        } else {
            ShelfError::ActorCommunication(e.to_string())
        }
    }
}
