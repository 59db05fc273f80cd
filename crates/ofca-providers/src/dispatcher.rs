//! Request dispatch — validation, credential lookup, transport routing.
//!
//! `Dispatcher` is the single entry point for a chat turn. It validates the
//! request, resolves the effective model and credential, hands the wire work
//! to the family transport, and returns the uniform [`ChatResult`].

use tracing::debug;

use ofca_core::{ChatError, ChatRequest, ChatResult};

use crate::auth::resolve_credential;
use crate::demo;
use crate::registry::{self, ProviderSpec};
use crate::transport::transport_for;

/// Routes chat requests to the right provider transport.
///
/// Holds the shared HTTP client so connection pools survive across turns.
pub struct Dispatcher {
    http: reqwest::Client,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// No client-side timeout is configured; slow providers get to take
    /// their time and the transport's own limits apply.
    pub fn new() -> Self {
        Dispatcher {
            http: reqwest::Client::new(),
        }
    }

    /// Validate, normalize, send, unwrap. Exactly one HTTP call per invocation.
    ///
    /// Credential resolution happens after validation and before any network
    /// I/O, so a missing key never produces a request on the wire.
    pub async fn dispatch(&self, request: &ChatRequest) -> Result<ChatResult, ChatError> {
        if request.transcript.is_empty() {
            return Err(ChatError::EmptyTranscript);
        }
        let spec = registry::describe(&request.provider_id)?;
        let model = effective_model(spec, request.model_id.as_deref())?;
        let credential = resolve_credential(spec)?;

        let transport = transport_for(spec.family);
        let payload = transport.normalize(request, &model);
        debug!(
            provider = spec.id,
            model = %model,
            messages = request.transcript.len(),
            "dispatching chat request"
        );

        let base_url = registry::resolve_base_url(spec);
        let raw = transport
            .send(&self.http, &base_url, spec, &credential, &payload)
            .await?;
        let content = transport.extract_content(spec, &raw)?;

        Ok(ChatResult {
            content,
            provider_id: spec.id.to_string(),
            model_id: model,
            is_demo: false,
        })
    }

    /// Demo-aware entry point.
    ///
    /// Transcript emptiness is rejected before the demo branch so both modes
    /// validate identically.
    pub async fn dispatch_or_demo(
        &self,
        request: &ChatRequest,
        demo_mode: bool,
    ) -> Result<ChatResult, ChatError> {
        if request.transcript.is_empty() {
            return Err(ChatError::EmptyTranscript);
        }
        if demo_mode {
            return Ok(demo::demo_respond(&request.provider_id).await);
        }
        self.dispatch(request).await
    }
}

/// Pick the model to use: an explicit id must be declared by the provider's
/// registry entry, otherwise the provider default applies.
fn effective_model(spec: &ProviderSpec, model_id: Option<&str>) -> Result<String, ChatError> {
    match model_id {
        Some(id) if !id.is_empty() => {
            if spec.has_model(id) {
                Ok(id.to_string())
            } else {
                Err(ChatError::unknown_model(spec.id, id))
            }
        }
        _ => Ok(spec.default_model().id.to_string()),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
