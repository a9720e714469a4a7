//! Credential redaction.
//!
//! Every string that leaves the process — subprocess output, error
//! messages, LLM prompts, console text — must pass through [`redact`]
//! (usually via [`SecretStore::redact`]) so configured secret values
//! never appear in any output channel.

use crate::constants::REDACTION_MASK;

/// Replace every exact occurrence of every non-empty secret with the mask.
///
/// Pure and idempotent: `redact(redact(x)) == redact(x)` because the mask
/// itself is never a configured secret.
pub fn redact(text: &str, secrets: &[String]) -> String {
    let mut out = text.to_string();
    for secret in secrets {
        if secret.is_empty() {
            continue;
        }
        out = out.replace(secret, REDACTION_MASK);
    }
    out
}

/// The set of secret values known to this pipeline run.
///
/// Initialized once at startup from config and threaded explicitly into
/// each component that produces outbound text. Holds the values so they
/// can be stripped; it never exposes them for display.
#[derive(Clone, Default)]
pub struct SecretStore {
    secrets: Vec<String>,
}

impl SecretStore {
    /// Build a store from candidate secret values, dropping empty ones.
    pub fn new(candidates: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            secrets: candidates
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Redact all known secrets from `text`.
    pub fn redact(&self, text: &str) -> String {
        redact(text, &self.secrets)
    }

    /// Number of secrets held.
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Returns `true` if no secrets are held.
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

impl std::fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretStore")
            .field("secrets", &format!("[{} redacted]", self.secrets.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_secrets_returns_original() {
        let out = redact("git clone finished", &[]);
        assert_eq!(out, "git clone finished");
    }

    #[test]
    fn single_secret_masked() {
        let secrets = vec!["ghp_abc123".to_string()];
        let out = redact("fatal: https://ghp_abc123@github.com/o/r failed", &secrets);
        assert!(!out.contains("ghp_abc123"));
        assert_eq!(out, "fatal: https://***@github.com/o/r failed");
    }

    #[test]
    fn every_occurrence_masked_with_exact_length() {
        let secret = "TOKEN_VALUE";
        let secrets = vec![secret.to_string()];
        let text = format!("a {secret} b {secret} c");
        let out = redact(&text, &secrets);

        assert!(!out.contains(secret));
        assert_eq!(out.matches(REDACTION_MASK).count(), 2);
        // Length shrinks by exactly (len(secret) - len(mask)) per occurrence
        let expected_len = text.len() - 2 * (secret.len() - REDACTION_MASK.len());
        assert_eq!(out.len(), expected_len);
    }

    #[test]
    fn empty_secret_is_ignored() {
        let secrets = vec![String::new()];
        assert_eq!(redact("untouched", &secrets), "untouched");
    }

    #[test]
    fn redact_is_idempotent() {
        let secrets = vec!["sk-secret".to_string()];
        let once = redact("key=sk-secret", &secrets);
        let twice = redact(&once, &secrets);
        assert_eq!(once, twice);
    }

    #[test]
    fn store_drops_none_and_empty_candidates() {
        let store = SecretStore::new([
            Some("tok".to_string()),
            None,
            Some(String::new()),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.redact("tok here"), "*** here");
    }

    #[test]
    fn store_debug_does_not_leak() {
        let store = SecretStore::new([Some("hunter2".to_string())]);
        let dbg = format!("{store:?}");
        assert!(!dbg.contains("hunter2"));
    }
}
