//! Error taxonomy for the dispatch path.
//!
//! Every failure mode a chat turn can hit is a variant here. All of them
//! propagate up to the session driver, which is the only recovery point.

use thiserror::Error;

/// Errors produced while validating, routing, or sending a chat request.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The provider id is not present in the registry.
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    /// The model id is not declared by the provider's registry entry.
    #[error("unknown model '{model}' for provider '{provider}'")]
    UnknownModel { provider: String, model: String },

    /// The provider's API key env var is unset or blank.
    #[error("no API key found for {provider}: set {env_var} in the environment or .env file")]
    MissingCredential { provider: String, env_var: String },

    /// A request was made with no messages in the transcript.
    #[error("transcript is empty: at least one message is required")]
    EmptyTranscript,

    /// Network, HTTP, or response envelope failure below the dispatch boundary.
    #[error("Error calling {provider} LLM: {reason}")]
    Transport { provider: String, reason: String },
}

impl ChatError {
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        ChatError::UnknownProvider(provider.into())
    }

    pub fn unknown_model(provider: impl Into<String>, model: impl Into<String>) -> Self {
        ChatError::UnknownModel {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn missing_credential(provider: impl Into<String>, env_var: impl Into<String>) -> Self {
        ChatError::MissingCredential {
            provider: provider.into(),
            env_var: env_var.into(),
        }
    }

    pub fn transport(provider: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ChatError::Transport {
            provider: provider.into(),
            reason: reason.to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
