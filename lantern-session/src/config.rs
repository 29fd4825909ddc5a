//! Session configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for the SSO handshake and token service.
///
/// Constructed once at startup and passed into the services that need
/// it; there is no ambient global. Secrets are redacted from `Debug`
/// output.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Identity-provider base URL (e.g., "https://id.example.org").
    pub provider_base_url: String,

    /// Shared secret for signing the SSO payload round-trip.
    pub sso_secret: String,

    /// API key for the provider's authenticated log-out endpoint.
    pub provider_api_key: String,

    /// Callback URL advertised in the outbound SSO payload.
    pub return_sso_url: String,

    /// Provider group whose members may sign in (besides admins).
    pub allowed_group: String,

    /// Signing secret for bearer tokens.
    pub token_secret: String,

    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: i64,

    /// SSO nonce lifetime in seconds (bounded by the hosting session).
    pub nonce_ttl_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            provider_base_url: "https://id.example.org".to_string(),
            sso_secret: String::new(),
            provider_api_key: String::new(),
            return_sso_url: "https://app.example.org/session/sso_login".to_string(),
            allowed_group: "helpline".to_string(),
            token_secret: String::new(),
            token_ttl_secs: 960, // 16 minutes
            nonce_ttl_secs: 600,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("provider_base_url", &self.provider_base_url)
            .field("sso_secret", &"<redacted>")
            .field("provider_api_key", &"<redacted>")
            .field("return_sso_url", &self.return_sso_url)
            .field("allowed_group", &self.allowed_group)
            .field("token_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("nonce_ttl_secs", &self.nonce_ttl_secs)
            .finish()
    }
}
