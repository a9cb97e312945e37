//! # ActorClient Trait
//!
//! Provides a common interface for domain-specific clients, adding default `send_command` and
//! `send_query` methods built on top of a generic `StateClient`.
use crate::{ActorState, FrameworkError, StateClient};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`StateClient`].
///
/// Implementors supply the inner client and an error mapping; the provided methods take care of
/// tracing and error conversion so that domain methods only deal with their own reply shapes.
///
/// # Example
///
/// ```rust
/// use state_actor::{ActorClient, ActorState, FrameworkError, StateClient};
/// use async_trait::async_trait;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct TallyError(String);
///
/// struct Tally(u32);
///
/// #[async_trait]
/// impl ActorState for Tally {
///     type Command = ();
///     type Outcome = u32;
///     type Query = ();
///     type View = u32;
///     type Context = ();
///     type Error = TallyError;
///     async fn handle_command(&mut self, _: (), _: &()) -> Result<u32, TallyError> {
///         self.0 += 1;
///         Ok(self.0)
///     }
///     async fn handle_query(&self, _: (), _: &()) -> Result<u32, TallyError> { Ok(self.0) }
/// }
///
/// struct TallyClient { inner: StateClient<Tally> }
///
/// #[async_trait]
/// impl ActorClient<Tally> for TallyClient {
///     type Error = TallyError;
///     fn inner(&self) -> &StateClient<Tally> { &self.inner }
///     fn map_error(e: FrameworkError) -> TallyError { TallyError(e.to_string()) }
/// }
///
/// async fn usage(client: TallyClient) {
///     let _ = client.send_command(()).await;
///     let _ = client.send_query(()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<S: ActorState>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StateClient.
    fn inner(&self) -> &StateClient<S>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send a command and wait for its outcome.
    #[tracing::instrument(skip(self))]
    async fn send_command(&self, command: S::Command) -> Result<S::Outcome, Self::Error> {
        tracing::debug!("Sending command");
        self.inner().command(command).await.map_err(Self::map_error)
    }

    /// Send a query and wait for its view.
    #[tracing::instrument(skip(self))]
    async fn send_query(&self, query: S::Query) -> Result<S::View, Self::Error> {
        tracing::debug!("Sending query");
        self.inner().query(query).await.map_err(Self::map_error)
    }
}
