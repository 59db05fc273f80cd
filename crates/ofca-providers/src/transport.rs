//! Transport families — one wire dialect per provider family.
//!
//! `normalize` builds the provider-specific JSON payload from the uniform
//! request, `send` performs the single HTTP POST, and `extract_content`
//! unwraps the reply envelope. The dispatcher picks an implementation from
//! the provider's registry entry, so no code here branches on provider ids.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, error};

use ofca_core::{ChatError, ChatRequest, Message};

use crate::registry::{ProviderSpec, TransportFamily};

/// Token cap applied when the Anthropic dialect gets no explicit limit.
const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 8000;

/// API version header required by the Anthropic dialect.
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ─────────────────────────────────────────────
// Transport trait
// ─────────────────────────────────────────────

/// One wire dialect: payload shape, endpoint, auth scheme, reply envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Build the provider-specific JSON payload. Pure; the transcript is
    /// read but never mutated.
    fn normalize(&self, request: &ChatRequest, model: &str) -> Value;

    /// Perform the single HTTP call. No retries, no caching.
    async fn send(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        spec: &ProviderSpec,
        credential: &str,
        payload: &Value,
    ) -> Result<Value, ChatError>;

    /// Pull the assistant text out of the reply envelope.
    fn extract_content(&self, spec: &ProviderSpec, raw: &Value) -> Result<String, ChatError>;
}

/// Select the transport implementation for a provider family.
pub fn transport_for(family: TransportFamily) -> &'static dyn Transport {
    match family {
        TransportFamily::OpenAiCompat => &OpenAiCompatTransport,
        TransportFamily::Anthropic => &AnthropicTransport,
        TransportFamily::Mistral => &MistralTransport,
    }
}

// ─────────────────────────────────────────────
// Shared HTTP plumbing
// ─────────────────────────────────────────────

/// Send a prepared request and decode the JSON body, wrapping every failure
/// as a transport error for the provider.
async fn execute(
    spec: &ProviderSpec,
    request: reqwest::RequestBuilder,
) -> Result<Value, ChatError> {
    let response = request.send().await.map_err(|e| {
        error!(provider = spec.id, error = %e, "HTTP request failed");
        ChatError::transport(spec.id, &e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read error body".to_string());
        error!(provider = spec.id, status = %status, body = %body, "API error");
        return Err(ChatError::transport(
            spec.id,
            format!("{} — {}", status, body),
        ));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ChatError::transport(spec.id, &e))
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Envelope reader shared by the OpenAI-shaped dialects.
fn extract_choice_content(spec: &ProviderSpec, raw: &Value) -> Result<String, ChatError> {
    raw.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ChatError::transport(spec.id, "missing message content in response"))
}

// ─────────────────────────────────────────────
// OpenAI-compatible dialect (openai, openrouter, groq, grok)
// ─────────────────────────────────────────────

/// `/chat/completions` with Bearer auth and OpenAI message semantics.
pub struct OpenAiCompatTransport;

#[async_trait]
impl Transport for OpenAiCompatTransport {
    fn normalize(&self, request: &ChatRequest, model: &str) -> Value {
        let mut messages: Vec<Value> = Vec::with_capacity(request.transcript.len() + 1);
        if let Some(system) = &request.system_message {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.extend(
            request
                .transcript
                .iter()
                .map(|m| json!({ "role": m.role, "content": m.content })),
        );

        let mut body = Map::new();
        body.insert("model".to_string(), json!(model));
        body.insert("messages".to_string(), Value::Array(messages));
        if let Some(max_tokens) = request.max_tokens {
            body.insert("max_tokens".to_string(), json!(max_tokens));
        }
        // Explicit fields win on key collisions.
        if let Some(extra) = &request.extra_params {
            for (key, value) in extra {
                body.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        Value::Object(body)
    }

    async fn send(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        spec: &ProviderSpec,
        credential: &str,
        payload: &Value,
    ) -> Result<Value, ChatError> {
        let url = chat_completions_url(base_url);
        debug!(provider = spec.id, url = %url, "sending chat completion");
        execute(spec, http.post(&url).bearer_auth(credential).json(payload)).await
    }

    fn extract_content(&self, spec: &ProviderSpec, raw: &Value) -> Result<String, ChatError> {
        extract_choice_content(spec, raw)
    }
}

// ─────────────────────────────────────────────
// Anthropic dialect
// ─────────────────────────────────────────────

/// `/messages` with `x-api-key` auth.
///
/// The whole transcript is flattened into a single user turn and the system
/// prompt travels in a dedicated top-level field.
pub struct AnthropicTransport;

/// Flatten a transcript to `"<role>: <content>"` lines separated by blank
/// lines. Loses turn structure on purpose: the endpoint gets one user turn.
fn flatten_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Transport for AnthropicTransport {
    fn normalize(&self, request: &ChatRequest, model: &str) -> Value {
        let mut body = Map::new();
        body.insert("model".to_string(), json!(model));
        body.insert(
            "max_tokens".to_string(),
            json!(request.max_tokens.unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS)),
        );
        if let Some(system) = &request.system_message {
            body.insert("system".to_string(), json!(system));
        }
        body.insert(
            "messages".to_string(),
            json!([{ "role": "user", "content": flatten_transcript(&request.transcript) }]),
        );
        // Extras land last and may override the fields above, including the
        // token cap. Kept that way so callers can tune provider-only knobs.
        if let Some(extra) = &request.extra_params {
            for (key, value) in extra {
                body.insert(key.clone(), value.clone());
            }
        }
        Value::Object(body)
    }

    async fn send(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        spec: &ProviderSpec,
        credential: &str,
        payload: &Value,
    ) -> Result<Value, ChatError> {
        let url = format!("{}/messages", base_url.trim_end_matches('/'));
        debug!(provider = spec.id, url = %url, "sending messages request");
        execute(
            spec,
            http.post(&url)
                .header("x-api-key", credential)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(payload),
        )
        .await
    }

    fn extract_content(&self, spec: &ProviderSpec, raw: &Value) -> Result<String, ChatError> {
        match raw.get("content") {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Array(blocks)) => {
                let text: String = blocks
                    .iter()
                    .filter_map(|b| b.get("text").and_then(Value::as_str))
                    .collect();
                if text.is_empty() {
                    Err(ChatError::transport(
                        spec.id,
                        "missing message content in response",
                    ))
                } else {
                    Ok(text)
                }
            }
            _ => Err(ChatError::transport(
                spec.id,
                "missing message content in response",
            )),
        }
    }
}

// ─────────────────────────────────────────────
// Mistral dialect
// ─────────────────────────────────────────────

/// `/chat/completions` with Bearer auth, taking the transcript as-is.
///
/// A caller-supplied system message is dropped silently, as are the token
/// cap and extra params. The endpoint receives only model + messages.
pub struct MistralTransport;

#[async_trait]
impl Transport for MistralTransport {
    fn normalize(&self, request: &ChatRequest, model: &str) -> Value {
        json!({ "model": model, "messages": request.transcript })
    }

    async fn send(
        &self,
        http: &reqwest::Client,
        base_url: &str,
        spec: &ProviderSpec,
        credential: &str,
        payload: &Value,
    ) -> Result<Value, ChatError> {
        let url = chat_completions_url(base_url);
        debug!(provider = spec.id, url = %url, "sending chat completion");
        execute(spec, http.post(&url).bearer_auth(credential).json(payload)).await
    }

    fn extract_content(&self, spec: &ProviderSpec, raw: &Value) -> Result<String, ChatError> {
        extract_choice_content(spec, raw)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
