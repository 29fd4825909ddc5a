//! SSO nonce storage seam.
//!
//! The nonce issued at the start of a handshake lives in the caller's
//! browser-session container. Modeling that container as an explicit
//! store makes the one-shot consumption a visible operation and keeps
//! the handshake testable without a real HTTP session.

use crate::error::SessionResult;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Per-browser-session nonce storage for the SSO handshake.
#[async_trait]
pub trait SsoSessionStore: Send + Sync {
    /// Stores the nonce for a session, replacing any previous one.
    async fn put_nonce(&self, session_id: &str, nonce: &str) -> SessionResult<()>;

    /// Removes and returns the nonce stored for this session, if any.
    ///
    /// One call consumes it, whether or not the caller's comparison
    /// afterwards succeeds.
    async fn take_nonce(&self, session_id: &str) -> SessionResult<Option<String>>;
}

/// In-memory nonce store with a wall-clock lifetime per entry,
/// standing in for the hosting session's own timeout.
pub struct MemorySsoSessionStore {
    ttl: TimeDelta,
    nonces: RwLock<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemorySsoSessionStore {
    #[must_use]
    pub fn new(nonce_ttl_secs: i64) -> Self {
        Self {
            ttl: TimeDelta::seconds(nonce_ttl_secs),
            nonces: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SsoSessionStore for MemorySsoSessionStore {
    async fn put_nonce(&self, session_id: &str, nonce: &str) -> SessionResult<()> {
        let mut nonces = self.nonces.write().await;
        nonces.insert(session_id.to_string(), (nonce.to_string(), Utc::now()));
        Ok(())
    }

    async fn take_nonce(&self, session_id: &str) -> SessionResult<Option<String>> {
        let mut nonces = self.nonces.write().await;
        Ok(nonces
            .remove(session_id)
            .filter(|(_, stored_at)| Utc::now() - *stored_at <= self.ttl)
            .map(|(nonce, _)| nonce))
    }
}
