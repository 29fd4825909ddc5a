//! Revocable short-lived bearer tokens.
//!
//! Tokens are HS256-signed credentials carrying the identity fields
//! plus a unique `jti`. Verification checks signature and expiry
//! locally, then consults the revocation store; a store that cannot
//! answer denies. Refresh re-reads the identity from durable storage
//! so role and email changes take effect immediately.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::identity::{Identity, IdentityId, IdentityStore, Role};
use crate::revocation::RevocationStore;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Clock-skew allowance when validating expiry, in seconds.
const LEEWAY_SECS: u64 = 30;

/// JWT claims for a bearer credential.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    role: Role,
    iat: i64,
    exp: i64,
    jti: String,
}

/// The identity fields a verified token vouches for.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentitySnapshot {
    pub id: IdentityId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Per-issuance identifier used purely for revocation; never reused.
    pub jti: String,
}

/// A freshly minted token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub jti: String,
}

/// Issues, verifies, refreshes, and revokes bearer tokens.
pub struct RevocableTokenService {
    ttl: TimeDelta,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    identities: Arc<dyn IdentityStore>,
    revocations: Arc<dyn RevocationStore>,
}

impl RevocableTokenService {
    pub fn new(
        config: &SessionConfig,
        identities: Arc<dyn IdentityStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.validate_exp = true;

        Self {
            ttl: TimeDelta::seconds(config.token_ttl_secs),
            encoding: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
            identities,
            revocations,
        }
    }

    /// Mints a signed, time-limited credential for an identity.
    pub fn issue(&self, identity: &Identity) -> SessionResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let jti = uuid::Uuid::new_v4().to_string();

        let claims = Claims {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            name: identity.full_name.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| SessionError::TokenEncoding(e.to_string()))?;

        debug!(subject = %identity.id, jti = jti.as_str(), "bearer token issued");
        Ok(IssuedToken {
            token,
            expires_at,
            jti,
        })
    }

    /// Verifies a token: signature and expiry first (local, cheap),
    /// then the revocation round-trip. An unreachable revocation store
    /// denies rather than assuming "not revoked".
    pub async fn verify(&self, token: &str) -> SessionResult<IdentitySnapshot> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                    _ => SessionError::TokenMalformed,
                }
            })?;
        let claims = data.claims;

        let destroyed = match self.revocations.is_destroyed(&claims.jti).await {
            Ok(destroyed) => destroyed,
            Err(e) => {
                warn!(error = %e, "revocation store unreachable, failing closed");
                return Err(SessionError::TokenRevoked);
            }
        };
        if destroyed {
            return Err(SessionError::TokenRevoked);
        }

        snapshot_from_claims(claims)
    }

    /// Idempotently records a token id as destroyed.
    pub async fn revoke(&self, jti: &str) -> SessionResult<()> {
        self.revocations
            .mark_destroyed(jti, self.blacklist_ttl())
            .await?;
        debug!(jti, "token revoked");
        Ok(())
    }

    /// Rotates a still-valid token: verifies, revokes the old `jti`,
    /// and issues a fresh token from the durable identity record.
    ///
    /// Two concurrent refreshes of the same token may both succeed;
    /// revocation is idempotent and the old token is dead either way.
    pub async fn refresh(&self, old_token: &str) -> SessionResult<IssuedToken> {
        let snapshot = self.verify(old_token).await?;

        let identity = self
            .identities
            .fetch(snapshot.id)
            .await?
            .ok_or(SessionError::StaleIdentity)?;

        self.revoke(&snapshot.jti).await?;
        self.issue(&identity)
    }

    /// A blacklist entry only needs to outlive the token it kills.
    fn blacklist_ttl(&self) -> Duration {
        let ttl_secs = self.ttl.num_seconds().max(0) as u64;
        Duration::from_secs(ttl_secs + 2 * LEEWAY_SECS)
    }
}

fn snapshot_from_claims(claims: Claims) -> SessionResult<IdentitySnapshot> {
    let subject = claims
        .sub
        .parse::<uuid::Uuid>()
        .map_err(|_| SessionError::TokenMalformed)?;
    let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(SessionError::TokenMalformed)?;
    let expires_at =
        DateTime::from_timestamp(claims.exp, 0).ok_or(SessionError::TokenMalformed)?;

    Ok(IdentitySnapshot {
        id: IdentityId(subject),
        email: claims.email,
        full_name: claims.name,
        role: claims.role,
        issued_at,
        expires_at,
        jti: claims.jti,
    })
}
