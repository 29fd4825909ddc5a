//! Revocation-store seam for bearer tokens.
//!
//! The token wire format is not revocable by signature alone, so
//! destroyed `jti` values are recorded in a shared fast store that
//! every verifier consults. The store is a best-effort blacklist: its
//! only answer is "should this token be treated as dead". Consumers
//! fail closed when it is unreachable.

use crate::error::SessionResult;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared blacklist of destroyed token ids.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Records a token id as destroyed. Idempotent. The entry only
    /// needs to outlive the token it kills, so callers pass a TTL.
    async fn mark_destroyed(&self, jti: &str, ttl: Duration) -> SessionResult<()>;

    /// True if the token id has been recorded as destroyed.
    async fn is_destroyed(&self, jti: &str) -> SessionResult<bool>;
}

/// In-memory revocation store for tests and single-process deployments.
///
/// Entries are pruned opportunistically on lookup once their TTL has
/// lapsed; an expired entry and an absent one are indistinguishable to
/// callers, which is exactly the store contract.
#[derive(Default)]
pub struct MemoryRevocationStore {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn mark_destroyed(&self, jti: &str, ttl: Duration) -> SessionResult<()> {
        let entry_expiry =
            Utc::now() + TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let mut entries = self.entries.write().await;
        entries.insert(jti.to_string(), entry_expiry);
        Ok(())
    }

    async fn is_destroyed(&self, jti: &str) -> SessionResult<bool> {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        entries.retain(|_, entry_expiry| *entry_expiry > now);
        Ok(entries.contains_key(jti))
    }
}
