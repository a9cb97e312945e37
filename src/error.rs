//! Errors surfaced by the [`Kitchen`](crate::lifecycle::Kitchen).

use crate::config::ConfigError;
use crate::shelf_set::ShelfError;
use crate::source::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KitchenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Shelf set error: {0}")]
    Shelf(#[from] ShelfError),

    /// `start` was called on a kitchen that is already receiving orders.
    #[error("Arrivals already started")]
    AlreadyStarted,

    #[error("Kitchen task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
