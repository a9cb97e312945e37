//! Error types for the Shelf Set actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShelfError {
    /// An error occurred while communicating with the actor.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),

    /// The actor did not answer within the allotted time.
    #[error("Shelf set did not respond in time")]
    Timeout,

    /// The actor answered a request with the reply of another.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}
