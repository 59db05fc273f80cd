//! Demo responder — canned replies for running without API keys.
//!
//! Picks a provider-flavored response at random and sleeps briefly so the
//! session feels like a real round trip. Never reads credentials, never
//! touches the network.

use std::time::Duration;

use tracing::debug;

use ofca_core::ChatResult;

/// Simulated latency window, in milliseconds.
const MIN_DELAY_MS: u64 = 300;
const MAX_DELAY_MS: u64 = 1500;

/// Fallback pool for providers without a dedicated one.
static DEFAULT_RESPONSES: &[&str] = &[
    "This is a demo response. In actual usage, this would be a response from the AI model.",
    "Demo mode is active. The actual response would come from the selected AI provider.",
    "This is a simulated response for demonstration purposes.",
];

/// Per-provider canned response pools.
static PROVIDER_RESPONSES: &[(&str, &[&str])] = &[
    (
        "openai",
        &[
            "Hello! This is a simulated GPT response.",
            "In actual usage, this would be processed by OpenAI's API.",
        ],
    ),
    (
        "anthropic",
        &[
            "Hello! I'm simulating a Claude response.",
            "This is a demo of how Claude would respond.",
        ],
    ),
    (
        "openrouter",
        &[
            "Simulated response from OpenRouter.",
            "This demonstrates OpenRouter's functionality.",
        ],
    ),
    (
        "groq",
        &[
            "This is a simulated Groq response.",
            "In actual usage, Groq's API would process this.",
        ],
    ),
    (
        "grok",
        &[
            "Simulated Grok response here.",
            "This shows how Grok would respond.",
        ],
    ),
    (
        "mistral",
        &[
            "This is a simulated Mistral response.",
            "Demonstrating Mistral's capabilities in demo mode.",
        ],
    ),
];

/// The canned pool for a provider; unknown ids get the fallback pool.
pub fn pool_for(provider_id: &str) -> &'static [&'static str] {
    PROVIDER_RESPONSES
        .iter()
        .find(|(id, _)| *id == provider_id)
        .map(|(_, pool)| *pool)
        .unwrap_or(DEFAULT_RESPONSES)
}

/// Uniform pick from the provider's pool.
fn pick_response(provider_id: &str) -> &'static str {
    let pool = pool_for(provider_id);
    pool[(random_u64() % pool.len() as u64) as usize]
}

/// Uniform delay in `[MIN_DELAY_MS, MAX_DELAY_MS)`.
fn simulated_delay() -> Duration {
    let span = MAX_DELAY_MS - MIN_DELAY_MS;
    Duration::from_millis(MIN_DELAY_MS + random_u64() % span)
}

/// Best-effort OS randomness; falls back to the clock if the source fails.
fn random_u64() -> u64 {
    getrandom::u64().unwrap_or_else(|_| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

/// Produce a canned reply after a short simulated think time.
///
/// The result always reports `<provider>-demo` as the model, making
/// simulated turns easy to spot in logs and transcripts.
pub async fn demo_respond(provider_id: &str) -> ChatResult {
    let delay = simulated_delay();
    debug!(
        provider = provider_id,
        delay_ms = delay.as_millis() as u64,
        "simulating response"
    );
    tokio::time::sleep(delay).await;

    ChatResult {
        content: pick_response(provider_id).to_string(),
        provider_id: provider_id.to_string(),
        model_id: format!("{provider_id}-demo"),
        is_demo: true,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
