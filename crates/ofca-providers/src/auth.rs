//! Credential resolution — API keys come from the environment only.
//!
//! Lookup happens once per live dispatch, after validation and before any
//! network I/O. The demo path never calls into this module.

use ofca_core::ChatError;

use crate::registry::ProviderSpec;

/// Look up the API key for a provider.
///
/// A value that is unset or blank after trimming counts as missing. The
/// returned string is the raw environment value, untrimmed. Callers must
/// never log it.
pub fn resolve_credential(spec: &ProviderSpec) -> Result<String, ChatError> {
    match std::env::var(spec.key_env_var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ChatError::missing_credential(spec.id, spec.key_env_var)),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TransportFamily;

    // Specs with dedicated env vars so parallel tests never share state.
    fn test_spec(env_var: &'static str) -> ProviderSpec {
        ProviderSpec {
            id: "testprov",
            display_name: "Test Provider",
            base_url: "https://example.invalid/v1",
            key_env_var: env_var,
            family: TransportFamily::OpenAiCompat,
            models: &[],
        }
    }

    #[test]
    fn missing_when_unset() {
        let spec = test_spec("OFCA_TEST_KEY_UNSET");
        std::env::remove_var("OFCA_TEST_KEY_UNSET");
        let err = resolve_credential(&spec).unwrap_err();
        assert!(matches!(err, ChatError::MissingCredential { .. }));
        let msg = err.to_string();
        assert!(msg.contains("testprov"));
        assert!(msg.contains("OFCA_TEST_KEY_UNSET"));
    }

    #[test]
    fn missing_when_whitespace_only() {
        let spec = test_spec("OFCA_TEST_KEY_BLANK");
        std::env::set_var("OFCA_TEST_KEY_BLANK", "   \t ");
        let err = resolve_credential(&spec).unwrap_err();
        assert!(matches!(err, ChatError::MissingCredential { .. }));
        std::env::remove_var("OFCA_TEST_KEY_BLANK");
    }

    #[test]
    fn returns_raw_value_untrimmed() {
        let spec = test_spec("OFCA_TEST_KEY_PADDED");
        std::env::set_var("OFCA_TEST_KEY_PADDED", " sk-test-123 ");
        let key = resolve_credential(&spec).unwrap();
        assert_eq!(key, " sk-test-123 ");
        std::env::remove_var("OFCA_TEST_KEY_PADDED");
    }

    #[test]
    fn error_never_contains_a_key_value() {
        let spec = test_spec("OFCA_TEST_KEY_SECRET");
        std::env::set_var("OFCA_TEST_KEY_SECRET", "sk-super-secret");
        // A present key doesn't error, so only the missing case has a message.
        std::env::remove_var("OFCA_TEST_KEY_SECRET");
        let err = resolve_credential(&spec).unwrap_err();
        assert!(!err.to_string().contains("sk-super-secret"));
    }
}
