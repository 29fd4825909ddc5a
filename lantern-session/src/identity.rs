//! Identity model and durable-store seam.
//!
//! Identities are created and updated only through the SSO callback
//! (upsert keyed by the provider-issued external id). Role changes are
//! a separate staff-side operation and never happen here.

use crate::error::{SessionError, SessionResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// Unique identifier for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub uuid::Uuid);

impl IdentityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application role of an authenticated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Unassigned,
    Volunteer,
    Staff,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Unassigned => write!(f, "unassigned"),
            Role::Volunteer => write!(f, "volunteer"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

/// An authenticated staff or volunteer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    /// Provider-issued external id the upsert is keyed on.
    pub external_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub created: DateTime<Utc>,
}

/// Durable identity storage.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create-or-update keyed by external id. New identities start as
    /// [`Role::Unassigned`]; on conflict email and full name are
    /// refreshed and the role is left untouched.
    async fn upsert_by_external_id(
        &self,
        external_id: &str,
        email: &str,
        full_name: Option<&str>,
    ) -> SessionResult<Identity>;

    /// Fetches an identity by id.
    async fn fetch(&self, id: IdentityId) -> SessionResult<Option<Identity>>;
}

#[derive(Default)]
struct MemoryIdentityState {
    by_id: HashMap<IdentityId, Identity>,
    by_external: HashMap<String, IdentityId>,
}

/// In-memory identity store for tests and small deployments.
#[derive(Default)]
pub struct MemoryIdentityStore {
    state: RwLock<MemoryIdentityState>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Staff-side role mutation (out of band for the SSO flow).
    /// Returns false if the identity does not exist.
    pub async fn set_role(&self, id: IdentityId, role: Role) -> bool {
        let mut state = self.state.write().await;
        match state.by_id.get_mut(&id) {
            Some(identity) => {
                identity.role = role;
                true
            }
            None => false,
        }
    }

    /// Looks up an identity by the provider-issued external id.
    pub async fn find_by_external_id(&self, external_id: &str) -> Option<Identity> {
        let state = self.state.read().await;
        let id = state.by_external.get(external_id)?;
        state.by_id.get(id).cloned()
    }

    /// Removes an identity (account deletion).
    pub async fn remove(&self, id: IdentityId) -> bool {
        let mut state = self.state.write().await;
        match state.by_id.remove(&id) {
            Some(identity) => {
                state.by_external.remove(&identity.external_id);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn upsert_by_external_id(
        &self,
        external_id: &str,
        email: &str,
        full_name: Option<&str>,
    ) -> SessionResult<Identity> {
        let mut state = self.state.write().await;

        if let Some(id) = state.by_external.get(external_id).copied() {
            let identity = state
                .by_id
                .get_mut(&id)
                .ok_or_else(|| SessionError::Store("external-id index out of sync".into()))?;
            identity.email = email.to_string();
            identity.full_name = full_name.map(str::to_string);
            return Ok(identity.clone());
        }

        let identity = Identity {
            id: IdentityId::new(),
            external_id: external_id.to_string(),
            email: email.to_string(),
            full_name: full_name.map(str::to_string),
            role: Role::Unassigned,
            created: Utc::now(),
        };
        state.by_external.insert(external_id.to_string(), identity.id);
        state.by_id.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn fetch(&self, id: IdentityId) -> SessionResult<Option<Identity>> {
        let state = self.state.read().await;
        Ok(state.by_id.get(&id).cloned())
    }
}
