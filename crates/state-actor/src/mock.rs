//! # Mock Framework & Testing Guide
//!
//! `MockClient<S>` hands out a real `StateClient<S>` whose requests are answered from a queue of
//! scripted expectations instead of a running state. It lets you test code that *uses* a client
//! (timers, orchestrators, domain wrappers) without spawning the actor it talks to.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use state_actor::mock::MockClient;
//! use state_actor::{ActorState, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("Err")]
//! struct GaugeError;
//!
//! struct Gauge(i64);
//!
//! #[async_trait]
//! impl ActorState for Gauge {
//!     type Command = i64; type Outcome = i64; type Query = (); type View = i64;
//!     type Context = (); type Error = GaugeError;
//!     async fn handle_command(&mut self, v: i64, _: &()) -> Result<i64, GaugeError> { self.0 = v; Ok(v) }
//!     async fn handle_query(&self, _: (), _: &()) -> Result<i64, GaugeError> { Ok(self.0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Gauge>::new();
//!     mock.expect_command().return_ok(7);
//!     mock.expect_query().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.command(7).await.unwrap(), 7);
//!     assert!(matches!(client.query(()).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and a receiver you answer by hand, or the fluent
//! [`MockClient`] API. Every request the mock answers is recorded and available through
//! [`MockClient::commands`] for assertions on what was sent.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::ActorState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply for the next request the mock receives.
enum Expectation<S: ActorState> {
    Command {
        response: Result<S::Outcome, FrameworkError>,
    },
    Query {
        response: Result<S::View, FrameworkError>,
    },
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that arrives when the queue is empty, or whose
/// kind does not match the next expectation, is answered with `FrameworkError::ActorDropped`
/// and counted as unexpected; [`verify`](MockClient::verify) then fails.
pub struct MockClient<S: ActorState> {
    client: StateClient<S>,
    expectations: Expectations<S>,
    commands: Arc<Mutex<Vec<S::Command>>>,
    unexpected: Arc<Mutex<usize>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: ActorState> Default for MockClient<S>
where
    S::Command: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ActorState> MockClient<S>
where
    S::Command: Clone,
{
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let commands = Arc::new(Mutex::new(Vec::new()));
        let unexpected = Arc::new(Mutex::new(0));

        let exps = expectations.clone();
        let seen = commands.clone();
        let misses = unexpected.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&exps).pop_front();
                match (request, next) {
                    (
                        StateRequest::Command {
                            command,
                            respond_to,
                        },
                        Some(Expectation::Command { response }),
                    ) => {
                        lock(&seen).push(command);
                        let _ = respond_to.send(response);
                    }
                    (StateRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, next) => {
                        *lock(&misses) += 1;
                        if let Some(expectation) = next {
                            lock(&exps).push_front(expectation);
                        }
                        // Dropping the responder surfaces as ActorDropped on the caller side.
                        drop(request);
                    }
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            expectations,
            commands,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<S> {
        self.client.clone()
    }

    /// Expects a command.
    pub fn expect_command(&mut self) -> CommandExpectationBuilder<S> {
        CommandExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a query.
    pub fn expect_query(&mut self) -> QueryExpectationBuilder<S> {
        QueryExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Commands answered so far, in arrival order.
    pub fn commands(&self) -> Vec<S::Command> {
        lock(&self.commands).clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
        let misses = *lock(&self.unexpected);
        if misses != 0 {
            panic!("{} unexpected request(s) received", misses);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Builder for command expectations.
pub struct CommandExpectationBuilder<S: ActorState> {
    expectations: Expectations<S>,
}

impl<S: ActorState> CommandExpectationBuilder<S> {
    /// Sets the expectation to return a successful outcome.
    pub fn return_ok(self, outcome: S::Outcome) {
        lock(&self.expectations).push_back(Expectation::Command {
            response: Ok(outcome),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Command {
            response: Err(error),
        });
    }
}

/// Builder for query expectations.
pub struct QueryExpectationBuilder<S: ActorState> {
    expectations: Expectations<S>,
}

impl<S: ActorState> QueryExpectationBuilder<S> {
    /// Sets the expectation to return a successful view.
    pub fn return_ok(self, view: S::View) {
        lock(&self.expectations).push_back(Expectation::Query { response: Ok(view) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Query {
            response: Err(error),
        });
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// When the test needs to look at the exact request (and decide how or whether to answer it),
/// take the receiver and answer by hand with [`expect_command`] / [`expect_query`].
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (StateClient<S>, mpsc::Receiver<StateRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Command
pub async fn expect_command<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(
    S::Command,
    oneshot::Sender<Result<S::Outcome, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StateRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Query
pub async fn expect_query<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(S::Query, oneshot::Sender<Result<S::View, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StateRequest::Query { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Debug, thiserror::Error)]
    #[error("Ledger error")]
    struct LedgerError;

    struct Ledger {
        entries: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum LedgerCommand {
        Append(String),
    }

    #[async_trait]
    impl ActorState for Ledger {
        type Command = LedgerCommand;
        type Outcome = usize;
        type Query = ();
        type View = usize;
        type Context = ();
        type Error = LedgerError;

        async fn handle_command(
            &mut self,
            command: LedgerCommand,
            _ctx: &(),
        ) -> Result<usize, LedgerError> {
            match command {
                LedgerCommand::Append(entry) => self.entries.push(entry),
            }
            Ok(self.entries.len())
        }

        async fn handle_query(&self, _query: (), _ctx: &()) -> Result<usize, LedgerError> {
            Ok(self.entries.len())
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Ledger>(10);

        let task = tokio::spawn(async move {
            client
                .command(LedgerCommand::Append("first".to_string()))
                .await
        });

        let (command, responder) = expect_command(&mut receiver)
            .await
            .expect("Expected Command request");
        assert_eq!(command, LedgerCommand::Append("first".to_string()));
        responder.send(Ok(1)).unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Ledger>::new();
        mock.expect_command().return_ok(1);
        mock.expect_query().return_ok(1);

        let client = mock.client();
        let len = client
            .command(LedgerCommand::Append("entry".to_string()))
            .await
            .unwrap();
        assert_eq!(len, 1);
        assert_eq!(client.query(()).await.unwrap(), 1);

        assert_eq!(
            mock.commands(),
            vec![LedgerCommand::Append("entry".to_string())]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_dropped() {
        let mock = MockClient::<Ledger>::new();
        let client = mock.client();

        let result = client.query(()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
