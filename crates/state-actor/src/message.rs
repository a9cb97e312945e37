//! # Generic Messages
//!
//! This module defines the message types exchanged between a `StateClient` and a `StateActor`.

use crate::error::FrameworkError;
use crate::state::ActorState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Command**: mutation. Runs [`ActorState::handle_command`] with exclusive access.
/// - **Query**: read. Runs [`ActorState::handle_query`].
///
/// Both are processed in arrival order by the same loop, so a query never observes a
/// half-applied command.
#[derive(Debug)]
pub enum StateRequest<S: ActorState> {
    Command {
        command: S::Command,
        respond_to: Response<S::Outcome>,
    },
    Query {
        query: S::Query,
        respond_to: Response<S::View>,
    },
}
