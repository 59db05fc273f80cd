//! Provider registry — static specs for the 6 built-in providers.
//!
//! Each `ProviderSpec` describes how to reach a provider: base URL, API key
//! env var, which wire dialect it speaks, and the models it serves. The
//! registry is declared in code and never changes at runtime.

use ofca_core::ChatError;

// ─────────────────────────────────────────────
// TransportFamily — which wire dialect a provider speaks
// ─────────────────────────────────────────────

/// Wire dialect of a provider's chat endpoint.
///
/// The dispatcher selects the transport implementation from this tag,
/// so adding a provider to an existing family is a registry-only change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportFamily {
    /// OpenAI-style `/chat/completions` with Bearer auth.
    OpenAiCompat,
    /// Anthropic `/messages` with `x-api-key` auth and a flattened transcript.
    Anthropic,
    /// Mistral `/chat/completions` — OpenAI-shaped but takes the bare transcript.
    Mistral,
}

// ─────────────────────────────────────────────
// ModelSpec / ProviderSpec
// ─────────────────────────────────────────────

/// Static metadata for one model a provider serves.
#[derive(Clone, Debug)]
pub struct ModelSpec {
    /// Model id as sent on the wire (e.g. `"gpt-4"`).
    pub id: &'static str,
    /// Short human-readable description for selection menus.
    pub description: &'static str,
    /// Context window size in tokens.
    pub context_window: u32,
    /// Whether this is the provider's default model.
    pub is_default: bool,
}

/// Static specification describing one LLM provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Registry id (e.g. `"openrouter"`). Lowercase, matched case-sensitively.
    pub id: &'static str,
    /// Human-readable name for menus and logs. E.g. `"OpenRouter"`.
    pub display_name: &'static str,
    /// Default API base URL.
    pub base_url: &'static str,
    /// Environment variable holding the API key. E.g. `"OPENROUTER_API_KEY"`.
    pub key_env_var: &'static str,
    /// Wire dialect for this provider's chat endpoint.
    pub family: TransportFamily,
    /// Models this provider serves. Never empty.
    pub models: &'static [ModelSpec],
}

impl ProviderSpec {
    /// The model used when the caller doesn't pick one:
    /// first flagged default, else first declared.
    pub fn default_model(&self) -> &ModelSpec {
        self.models
            .iter()
            .find(|m| m.is_default)
            .unwrap_or(&self.models[0])
    }

    /// Whether `model_id` is declared by this provider.
    pub fn has_model(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m.id == model_id)
    }
}

// ─────────────────────────────────────────────
// All 6 providers
// ─────────────────────────────────────────────

/// Provider used when a selection falls through.
pub static DEFAULT_PROVIDER: &str = "openai";

/// Complete list of supported provider specifications.
pub static PROVIDERS: &[ProviderSpec] = &[
    // 1. OpenAI
    ProviderSpec {
        id: "openai",
        display_name: "OpenAI",
        base_url: "https://api.openai.com/v1",
        key_env_var: "OPENAI_API_KEY",
        family: TransportFamily::OpenAiCompat,
        models: &[
            ModelSpec {
                id: "gpt-4-1106-preview",
                description: "Most capable GPT-4 model, better at following instructions",
                context_window: 128000,
                is_default: true,
            },
            ModelSpec {
                id: "gpt-4",
                description: "More reliable, creative, and capable of detailed instructions",
                context_window: 8192,
                is_default: false,
            },
            ModelSpec {
                id: "gpt-3.5-turbo",
                description: "Fastest and most cost-effective for most tasks",
                context_window: 16385,
                is_default: false,
            },
        ],
    },
    // 2. Anthropic — the only non-OpenAI-shaped wire format
    ProviderSpec {
        id: "anthropic",
        display_name: "Anthropic",
        base_url: "https://api.anthropic.com/v1",
        key_env_var: "ANTHROPIC_API_KEY",
        family: TransportFamily::Anthropic,
        models: &[
            ModelSpec {
                id: "claude-2.1",
                description: "Most capable Claude model, best for complex tasks",
                context_window: 200000,
                is_default: true,
            },
            ModelSpec {
                id: "claude-instant-1.2",
                description: "Faster and more cost-effective for simple tasks",
                context_window: 100000,
                is_default: false,
            },
        ],
    },
    // 3. OpenRouter
    ProviderSpec {
        id: "openrouter",
        display_name: "OpenRouter",
        base_url: "https://openrouter.ai/api/v1",
        key_env_var: "OPENROUTER_API_KEY",
        family: TransportFamily::OpenAiCompat,
        models: &[
            ModelSpec {
                id: "google/gemini-pro",
                description: "Google's most capable model for text generation",
                context_window: 32000,
                is_default: true,
            },
            ModelSpec {
                id: "meta-llama/llama-2-70b-chat",
                description: "Open source model with strong capabilities",
                context_window: 4096,
                is_default: false,
            },
        ],
    },
    // 4. Groq
    ProviderSpec {
        id: "groq",
        display_name: "Groq",
        base_url: "https://api.groq.com/v1",
        key_env_var: "GROQ_API_KEY",
        family: TransportFamily::OpenAiCompat,
        models: &[
            ModelSpec {
                id: "mixtral-8x7b-32768",
                description: "Fast inference Mixtral model with extended context",
                context_window: 32768,
                is_default: true,
            },
            ModelSpec {
                id: "llama2-70b-4096",
                description: "Fast inference Llama 2 model",
                context_window: 4096,
                is_default: false,
            },
        ],
    },
    // 5. Grok
    ProviderSpec {
        id: "grok",
        display_name: "Grok",
        base_url: "https://api.grok.x.ai/v1",
        key_env_var: "GROK_API_KEY",
        family: TransportFamily::OpenAiCompat,
        models: &[ModelSpec {
            id: "grok-1",
            description: "Latest Grok model with real-time knowledge",
            context_window: 8192,
            is_default: true,
        }],
    },
    // 6. Mistral — OpenAI-shaped endpoint, but no system prompt support
    ProviderSpec {
        id: "mistral",
        display_name: "Mistral",
        base_url: "https://api.mistral.ai/v1",
        key_env_var: "MISTRAL_API_KEY",
        family: TransportFamily::Mistral,
        models: &[
            ModelSpec {
                id: "mistral-large-latest",
                description: "Most capable Mistral model",
                context_window: 32768,
                is_default: true,
            },
            ModelSpec {
                id: "mistral-medium-latest",
                description: "Balanced performance and efficiency",
                context_window: 32768,
                is_default: false,
            },
            ModelSpec {
                id: "mistral-small-latest",
                description: "Fast and cost-effective",
                context_window: 32768,
                is_default: false,
            },
        ],
    },
];

// ─────────────────────────────────────────────
// Lookup functions
// ─────────────────────────────────────────────

/// Look up a provider spec by registry id.
pub fn describe(provider_id: &str) -> Result<&'static ProviderSpec, ChatError> {
    PROVIDERS
        .iter()
        .find(|spec| spec.id == provider_id)
        .ok_or_else(|| ChatError::unknown_provider(provider_id))
}

/// The registry entry for [`DEFAULT_PROVIDER`].
pub fn default_provider() -> &'static ProviderSpec {
    &PROVIDERS[0]
}

/// Resolve the API base for a provider: `OFCA_<ID>_BASE_URL` env override,
/// else the registry default. The override is mainly for proxies and tests.
pub fn resolve_base_url(spec: &ProviderSpec) -> String {
    let var = format!("OFCA_{}_BASE_URL", spec.id.to_uppercase());
    match std::env::var(&var) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => spec.base_url.to_string(),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_count() {
        assert_eq!(PROVIDERS.len(), 6);
    }

    #[test]
    fn test_all_providers_have_unique_ids() {
        let ids: Vec<&str> = PROVIDERS.iter().map(|s| s.id).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(ids.len(), unique.len(), "Duplicate provider ids found");
    }

    #[test]
    fn test_all_providers_have_models() {
        for spec in PROVIDERS {
            assert!(!spec.models.is_empty(), "{} has no models", spec.id);
        }
    }

    #[test]
    fn test_at_most_one_default_per_provider() {
        for spec in PROVIDERS {
            let defaults = spec.models.iter().filter(|m| m.is_default).count();
            assert!(defaults <= 1, "{} flags {} defaults", spec.id, defaults);
        }
    }

    #[test]
    fn test_describe_known() {
        let spec = describe("groq").unwrap();
        assert_eq!(spec.display_name, "Groq");
        assert_eq!(spec.key_env_var, "GROQ_API_KEY");
        assert_eq!(spec.family, TransportFamily::OpenAiCompat);
    }

    #[test]
    fn test_describe_unknown() {
        let err = describe("acme").unwrap_err();
        assert!(matches!(err, ChatError::UnknownProvider(ref id) if id == "acme"));
    }

    #[test]
    fn test_describe_is_case_sensitive() {
        assert!(describe("OpenAI").is_err());
    }

    #[test]
    fn test_default_model_flagged() {
        let spec = describe("openai").unwrap();
        assert_eq!(spec.default_model().id, "gpt-4-1106-preview");
    }

    #[test]
    fn test_default_model_for_every_provider() {
        // The flagged-default-else-first rule must yield a model everywhere.
        for spec in PROVIDERS {
            assert!(spec.has_model(spec.default_model().id));
        }
    }

    #[test]
    fn test_has_model() {
        let spec = describe("mistral").unwrap();
        assert!(spec.has_model("mistral-small-latest"));
        assert!(!spec.has_model("mistral-xxl"));
    }

    #[test]
    fn test_default_provider_is_openai() {
        assert_eq!(default_provider().id, DEFAULT_PROVIDER);
    }

    #[test]
    fn test_anthropic_family() {
        assert_eq!(
            describe("anthropic").unwrap().family,
            TransportFamily::Anthropic
        );
    }

    #[test]
    fn test_resolve_base_url_override_and_default() {
        // Single test so the env var is only touched from one thread.
        let spec = describe("openai").unwrap();
        std::env::set_var("OFCA_OPENAI_BASE_URL", "http://localhost:9999/v1");
        assert_eq!(resolve_base_url(spec), "http://localhost:9999/v1");
        std::env::set_var("OFCA_OPENAI_BASE_URL", "   ");
        assert_eq!(resolve_base_url(spec), "https://api.openai.com/v1");
        std::env::remove_var("OFCA_OPENAI_BASE_URL");
        assert_eq!(resolve_base_url(spec), "https://api.openai.com/v1");
    }
}
