//! Request-level authentication gate.
//!
//! Verifies the bearer token, then re-fetches the identity from
//! durable storage and compares it against the token's snapshot. A
//! cryptographically valid token whose subject has since changed role
//! or email is rejected, forcing re-authentication. This runs on every
//! protected request, not just at login.

use crate::error::{SessionError, SessionResult};
use crate::identity::{Identity, IdentityStore};
use crate::token::RevocableTokenService;
use std::sync::Arc;
use tracing::warn;

/// Middleware contract for protected operations.
pub struct SessionGate {
    tokens: Arc<RevocableTokenService>,
    identities: Arc<dyn IdentityStore>,
}

impl SessionGate {
    pub fn new(tokens: Arc<RevocableTokenService>, identities: Arc<dyn IdentityStore>) -> Self {
        Self { tokens, identities }
    }

    /// Strips the RFC 6750 scheme prefix from an `Authorization`
    /// header value.
    #[must_use]
    pub fn strip_bearer(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Authenticates a request's bearer token.
    ///
    /// Returns the identity as currently persisted, which is the
    /// source of truth for every downstream authorization decision.
    pub async fn authenticate(&self, token: &str) -> SessionResult<Identity> {
        let snapshot = self.tokens.verify(token).await?;

        let Some(identity) = self.identities.fetch(snapshot.id).await? else {
            warn!(subject = %snapshot.id, "token subject no longer exists");
            return Err(SessionError::StaleIdentity);
        };

        if identity.email != snapshot.email
            || identity.role != snapshot.role
            || identity.full_name != snapshot.full_name
        {
            warn!(
                subject = %snapshot.id,
                "identity diverged from token snapshot, forcing re-authentication"
            );
            return Err(SessionError::StaleIdentity);
        }

        Ok(identity)
    }
}
