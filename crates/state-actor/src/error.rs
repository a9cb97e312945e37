//! # Framework Errors
//!
//! Common error types used by every actor and client built on this crate.

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("No reply within {0:?}")]
    Timeout(Duration),
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the request was not answered in time. The request may still be applied
    /// later; callers treat the result as undetermined and retry on their next tick.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FrameworkError::Timeout(_))
    }
}
