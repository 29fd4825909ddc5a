//! Letters configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for anonymous letter access.
#[derive(Clone, Serialize, Deserialize)]
pub struct LettersConfig {
    /// Deployment-wide salt for access-key lookup hashes. Shared
    /// across records so the hash works as an index; distinct from the
    /// per-record password salts.
    pub lookup_salt: String,
}

impl fmt::Debug for LettersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LettersConfig")
            .field("lookup_salt", &"<redacted>")
            .finish()
    }
}
