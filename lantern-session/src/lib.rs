//! Secure session core for Lantern.
//!
//! Provides the authenticated half of the application's access model:
//! - SSO handshake with the identity provider (signed payload
//!   round-trip, one-shot nonce)
//! - Revocable short-lived bearer tokens backed by a shared
//!   revocation blacklist
//! - A request-level gate that re-checks every token against the
//!   durable identity record
//!
//! External collaborators (identity storage, the revocation store, the
//! browser-session container, the provider HTTP endpoint) are reached
//! through injected seams; in-memory implementations ship for tests
//! and single-process deployments.

pub mod config;
pub mod error;
pub mod gate;
pub mod identity;
pub mod provider;
pub mod revocation;
pub mod session_store;
pub mod sso;
pub mod token;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use gate::SessionGate;
pub use identity::{Identity, IdentityId, IdentityStore, MemoryIdentityStore, Role};
pub use provider::ProviderClient;
pub use revocation::{MemoryRevocationStore, RevocationStore};
pub use session_store::{MemorySsoSessionStore, SsoSessionStore};
pub use sso::{SsoHandshake, SsoPayload, SsoRedirect};
pub use token::{IdentitySnapshot, IssuedToken, RevocableTokenService};
