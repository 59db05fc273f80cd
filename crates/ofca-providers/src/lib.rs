//! Provider layer for OFCA.
//!
//! # Architecture
//!
//! - [`registry`] — static specs for the built-in providers and their models
//! - [`auth`] — API key resolution from the environment
//! - [`transport`] — one wire dialect per provider family, behind the
//!   [`transport::Transport`] trait
//! - [`dispatcher::Dispatcher`] — validation + routing, the single entry point
//! - [`demo`] — canned responses for keyless demo sessions

pub mod auth;
pub mod demo;
pub mod dispatcher;
pub mod registry;
pub mod transport;

// Re-export main types for convenience
pub use dispatcher::Dispatcher;
pub use registry::{ModelSpec, ProviderSpec, TransportFamily, DEFAULT_PROVIDER, PROVIDERS};
pub use transport::Transport;
