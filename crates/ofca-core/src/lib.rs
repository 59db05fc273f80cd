//! Shared types and errors for OFCA.
//!
//! Everything that crosses a crate boundary lives here: the transcript types,
//! the uniform request/result contract, and the error taxonomy.

pub mod error;
pub mod types;

// Re-export main types for convenience
pub use error::ChatError;
pub use types::{ChatRequest, ChatResult, Message, Role};
