//! Letter error types.

use crate::records::ReplyStatus;
use lantern_crypto::CryptoError;
use thiserror::Error;

/// Result type for letter operations.
pub type LetterResult<T> = Result<T, LetterError>;

/// Errors that can occur in anonymous letter access and the reply
/// workflow.
#[derive(Debug, Error)]
pub enum LetterError {
    /// Returned for an unknown access key and for a wrong access
    /// password alike, so responses cannot be used to enumerate keys.
    #[error("letter credentials did not match")]
    CredentialMismatch,

    #[error("invalid reply transition: {from} -> {to}")]
    InvalidTransition { from: ReplyStatus, to: ReplyStatus },

    #[error("reply content is empty")]
    EmptyReply,

    #[error("record not found")]
    NotFound,

    #[error("storage operation failed: {0}")]
    Storage(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
