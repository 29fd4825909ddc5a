//! Session error types.
//!
//! Variants stay distinguishable for logs and tests; user-visible
//! output goes through [`SessionError::public_message`], which
//! collapses every authentication-class failure to one string so a
//! response never reveals why a credential was rejected.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur in the SSO handshake, token service, and gate.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session container for SSO flow")]
    InvalidSession,

    #[error("SSO signature mismatch")]
    SignatureMismatch,

    #[error("SSO nonce missing, mismatched, or replayed")]
    NonceMismatch,

    #[error("identity is not authorized for this application")]
    NotAuthorized,

    #[error("token expired")]
    TokenExpired,

    #[error("token revoked")]
    TokenRevoked,

    #[error("token malformed")]
    TokenMalformed,

    #[error("identity record diverged from the issued token")]
    StaleIdentity,

    #[error("token encoding failed: {0}")]
    TokenEncoding(String),

    #[error("store operation failed: {0}")]
    Store(String),

    #[error("provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
}

impl SessionError {
    /// Message safe to surface to an end user.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::TokenEncoding(_) | Self::Store(_) | Self::Provider(_) => "service unavailable",
            _ => "unauthorized",
        }
    }
}
