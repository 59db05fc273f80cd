//! Core types for OFCA — the uniform contract every provider speaks.
//!
//! A session builds a transcript of [`Message`]s, wraps it in a
//! [`ChatRequest`], and gets back a [`ChatResult`] regardless of which
//! provider answered. Provider-specific payload shapes never leak past
//! the transport layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// Speaker role for a transcript entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Lowercase wire name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transcript entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// ChatRequest
// ─────────────────────────────────────────────

/// A provider-agnostic chat request.
///
/// The transcript is never mutated by the dispatch path; transports build
/// fresh payloads from it.
#[derive(Clone, Debug)]
pub struct ChatRequest {
    /// Registry id of the target provider (e.g. `"openai"`).
    pub provider_id: String,
    /// Explicit model id. `None` means the provider's default model.
    pub model_id: Option<String>,
    /// Ordered conversation history. Must not be empty.
    pub transcript: Vec<Message>,
    /// Optional system prompt, delivered however the provider family expects.
    pub system_message: Option<String>,
    /// Token generation cap, forwarded to providers that accept one.
    pub max_tokens: Option<u32>,
    /// Extra body fields merged into the outgoing payload.
    pub extra_params: Option<Map<String, Value>>,
}

impl ChatRequest {
    /// Create a request with defaults for everything but provider and transcript.
    pub fn new(provider_id: impl Into<String>, transcript: Vec<Message>) -> Self {
        ChatRequest {
            provider_id: provider_id.into(),
            model_id: None,
            transcript,
            system_message: None,
            max_tokens: None,
            extra_params: None,
        }
    }

    /// Set an explicit model id.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_message = Some(system.into());
        self
    }

    /// Set the token generation cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set extra body fields.
    pub fn with_extra_params(mut self, params: Map<String, Value>) -> Self {
        self.extra_params = Some(params);
        self
    }
}

// ─────────────────────────────────────────────
// ChatResult
// ─────────────────────────────────────────────

/// The uniform reply contract returned by every dispatch, live or demo.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
    /// Assistant reply text.
    pub content: String,
    /// Provider that produced (or simulated) the reply.
    pub provider_id: String,
    /// Model that was actually used.
    pub model_id: String,
    /// True when the reply came from the demo responder.
    pub is_demo: bool,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), json!("user"));
        assert_eq!(serde_json::to_value(Role::System).unwrap(), json!("system"));
        assert_eq!(
            serde_json::to_value(Role::Assistant).unwrap(),
            json!("assistant")
        );
    }

    #[test]
    fn role_display_matches_wire_name() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn message_serializes_as_role_content_pair() {
        let msg = Message::user("hello");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"role": "user", "content": "hello"})
        );
    }

    #[test]
    fn message_deserializes_from_wire_format() {
        let msg: Message =
            serde_json::from_value(json!({"role": "assistant", "content": "hi"})).unwrap();
        assert_eq!(msg, Message::assistant("hi"));
    }

    #[test]
    fn request_defaults() {
        let req = ChatRequest::new("openai", vec![Message::user("hi")]);
        assert_eq!(req.provider_id, "openai");
        assert!(req.model_id.is_none());
        assert!(req.system_message.is_none());
        assert!(req.max_tokens.is_none());
        assert!(req.extra_params.is_none());
    }

    #[test]
    fn request_builder_chain() {
        let mut extras = Map::new();
        extras.insert("temperature".to_string(), json!(0.2));

        let req = ChatRequest::new("mistral", vec![Message::user("hi")])
            .with_model("mistral-small-latest")
            .with_system("be brief")
            .with_max_tokens(512)
            .with_extra_params(extras);

        assert_eq!(req.model_id.as_deref(), Some("mistral-small-latest"));
        assert_eq!(req.system_message.as_deref(), Some("be brief"));
        assert_eq!(req.max_tokens, Some(512));
        assert_eq!(req.extra_params.unwrap()["temperature"], json!(0.2));
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = ChatResult {
            content: "ok".to_string(),
            provider_id: "groq".to_string(),
            model_id: "mixtral-8x7b-32768".to_string(),
            is_demo: false,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["providerId"], json!("groq"));
        assert_eq!(value["isDemo"], json!(false));
    }
}
