//! [`ActorState`] implementation for the [`ShelfSet`].
//!
//! The actor context is the simulation clock. Every request reads it once, so a whole policy
//! decision is taken at a single instant.

use super::actions::{ShelfCommand, ShelfOutcome, ShelfQuery, ShelfReport};
use super::error::ShelfError;
use super::policy::ShelfSet;
use crate::simulation::Clock;
use async_trait::async_trait;
use state_actor::ActorState;
use std::sync::Arc;
use tracing::{debug, enabled, Level};

#[async_trait]
impl ActorState for ShelfSet {
    type Command = ShelfCommand;
    type Outcome = ShelfOutcome;
    type Query = ShelfQuery;
    type View = ShelfReport;
    type Context = Arc<dyn Clock>;
    type Error = ShelfError;

    async fn handle_command(
        &mut self,
        command: ShelfCommand,
        clock: &Arc<dyn Clock>,
    ) -> Result<ShelfOutcome, ShelfError> {
        let now = clock.now();
        let outcome = match command {
            ShelfCommand::Submit(order) => ShelfOutcome::Submitted(self.submit(order, now)),
            ShelfCommand::Pickup(id) => ShelfOutcome::PickedUp(self.pickup(id, now)),
            ShelfCommand::Promote(temperature) => {
                ShelfOutcome::Promoted(self.promote(temperature, now))
            }
            ShelfCommand::Sweep => ShelfOutcome::Swept(self.sweep(now)),
        };
        if enabled!(Level::DEBUG) {
            debug!(snapshot = ?self.snapshot(now), "Shelves after command");
        }
        Ok(outcome)
    }

    async fn handle_query(
        &self,
        query: ShelfQuery,
        clock: &Arc<dyn Clock>,
    ) -> Result<ShelfReport, ShelfError> {
        Ok(match query {
            ShelfQuery::Size => ShelfReport::Size(self.len()),
            ShelfQuery::Snapshot => ShelfReport::Snapshot(self.snapshot(clock.now())),
        })
    }

    async fn on_stop(&mut self, clock: &Arc<dyn Clock>) {
        debug!(remaining = self.len(), at = %clock.now(), "Shelf set closing");
    }
}
