//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for any binary
//! built on this framework.
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix (`with_target(false)`)
//! and reads its filter from `RUST_LOG`.
//!
//! ```bash
//! # Lifecycle and state transitions
//! RUST_LOG=info cargo run -- orders.json
//!
//! # Full payloads and shelf snapshots
//! RUST_LOG=debug cargo run -- orders.json
//!
//! # Only the framework's request loop
//! RUST_LOG=state_actor=debug cargo run -- orders.json
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown of every `StateActor`
//! - **Requests**: each command and query with its `Debug` payload (debug level)
//! - **Errors**: failed commands with the error context (warn level)
//!
//! The `?` syntax in `debug!(?command, "Command")` records the value through its `Debug`
//! representation as a structured field.

/// Installs the global subscriber. Call once, at the top of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - events carry their own fields
        .compact()
        .init();
}
