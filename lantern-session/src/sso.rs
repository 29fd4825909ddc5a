//! SSO handshake with the identity provider.
//!
//! Outbound: a nonce is stored in the caller's session and carried to
//! the provider inside a base64 payload signed with the shared secret.
//! Inbound: the callback's signature is verified over the raw payload,
//! the nonce is consumed one-shot, the authorization policy is
//! applied, and the identity record is upserted.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::identity::{Identity, IdentityStore};
use crate::session_store::SsoSessionStore;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// Outcome of starting a handshake: where to send the browser.
#[derive(Debug, Clone)]
pub struct SsoRedirect {
    /// Fully assembled provider URL with `sso` and `sig` parameters.
    pub url: String,
    /// The nonce now stored in the caller's session.
    pub nonce: String,
}

/// Identity attributes extracted from a validated callback payload.
///
/// The provider sends an arbitrary query string; only these fields are
/// read, and they are validated before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoPayload {
    pub nonce: String,
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub admin: bool,
    pub moderator: bool,
    pub groups: Vec<String>,
}

impl SsoPayload {
    /// Parses the decoded payload query string. Returns `None` when a
    /// required field is missing.
    fn from_query(query: &str) -> Option<Self> {
        let mut nonce = None;
        let mut external_id = None;
        let mut email = None;
        let mut name = None;
        let mut username = None;
        let mut admin = false;
        let mut moderator = false;
        let mut groups = Vec::new();

        for pair in query.split('&') {
            let Some((key, raw_value)) = pair.split_once('=') else {
                continue;
            };
            let Ok(value) = urlencoding::decode(raw_value) else {
                continue;
            };
            let value = value.into_owned();
            match key {
                "nonce" => nonce = Some(value),
                "external_id" => external_id = Some(value),
                "email" => email = Some(value),
                "name" => name = Some(value).filter(|v| !v.is_empty()),
                "username" => username = Some(value).filter(|v| !v.is_empty()),
                "admin" => admin = value == "true",
                "moderator" => moderator = value == "true",
                "groups" => {
                    groups = value
                        .split(',')
                        .filter(|g| !g.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        Some(Self {
            nonce: nonce?,
            external_id: external_id?,
            email: email?,
            name,
            username,
            admin,
            moderator,
            groups,
        })
    }

    /// Authorization policy: admins and members of the allowed group
    /// may sign in; everyone else is refused before any record exists.
    fn is_allowed(&self, allowed_group: &str) -> bool {
        self.admin || self.groups.iter().any(|g| g == allowed_group)
    }
}

/// The signed redirect/callback exchange with the identity provider.
pub struct SsoHandshake {
    config: SessionConfig,
    sessions: Arc<dyn SsoSessionStore>,
    identities: Arc<dyn IdentityStore>,
}

impl SsoHandshake {
    pub fn new(
        config: SessionConfig,
        sessions: Arc<dyn SsoSessionStore>,
        identities: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            config,
            sessions,
            identities,
        }
    }

    /// Builds the outbound signed redirect and stores the nonce.
    ///
    /// A request without a session container cannot hold a nonce; no
    /// nonce is issued and the caller routes to its login-error page.
    pub async fn build_redirect(&self, session_id: Option<&str>) -> SessionResult<SsoRedirect> {
        let Some(session_id) = session_id else {
            warn!("SSO start without a session container");
            return Err(SessionError::InvalidSession);
        };

        let mut nonce_bytes = [0u8; 16];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = hex::encode(nonce_bytes);

        let inner = format!(
            "nonce={}&return_sso_url={}",
            nonce,
            urlencoding::encode(&self.config.return_sso_url)
        );
        let payload = BASE64.encode(inner);
        let sig = hex::encode(self.sign(payload.as_bytes()));

        self.sessions.put_nonce(session_id, &nonce).await?;

        let url = format!(
            "{}/sso_provider?sso={}&sig={}",
            self.config.provider_base_url.trim_end_matches('/'),
            urlencoding::encode(&payload),
            sig
        );

        debug!(session_id, "SSO redirect issued");
        Ok(SsoRedirect { url, nonce })
    }

    /// Validates the provider's signed callback and upserts the
    /// identity.
    ///
    /// The stored nonce is consumed whether or not it matches; a
    /// replayed callback therefore fails on its second presentation.
    pub async fn validate_callback(
        &self,
        session_id: &str,
        sso: Option<&str>,
        sig: Option<&str>,
    ) -> SessionResult<Identity> {
        let (Some(sso), Some(sig)) = (sso, sig) else {
            warn!("SSO callback missing sso or sig parameter");
            return Err(SessionError::SignatureMismatch);
        };

        let expected = hex::decode(sig).map_err(|_| SessionError::SignatureMismatch)?;
        let mut mac = HmacSha256::new_from_slice(self.config.sso_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(sso.as_bytes());
        if mac.verify_slice(&expected).is_err() {
            warn!("SSO callback signature mismatch");
            return Err(SessionError::SignatureMismatch);
        }

        // The secret signed this payload; a payload that still fails to
        // decode is producer corruption and treated like tampering.
        let decoded = BASE64
            .decode(sso)
            .map_err(|_| SessionError::SignatureMismatch)?;
        let query =
            String::from_utf8(decoded).map_err(|_| SessionError::SignatureMismatch)?;
        let payload =
            SsoPayload::from_query(&query).ok_or(SessionError::SignatureMismatch)?;

        let stored = self.sessions.take_nonce(session_id).await?;
        if stored.as_deref() != Some(payload.nonce.as_str()) {
            warn!(session_id, "SSO nonce missing, mismatched, or replayed");
            return Err(SessionError::NonceMismatch);
        }

        if !payload.is_allowed(&self.config.allowed_group) {
            warn!(
                external_id = payload.external_id.as_str(),
                "SSO identity not authorized"
            );
            return Err(SessionError::NotAuthorized);
        }

        let identity = self
            .identities
            .upsert_by_external_id(&payload.external_id, &payload.email, payload.name.as_deref())
            .await?;

        debug!(
            external_id = payload.external_id.as_str(),
            identity = %identity.id,
            "SSO callback validated"
        );
        Ok(identity)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.config.sso_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_required_and_optional_fields() {
        let payload = SsoPayload::from_query(
            "nonce=abc&external_id=42&email=vol%40example.org&name=Kai%20V&admin=false&groups=helpline,writers",
        )
        .unwrap();
        assert_eq!(payload.nonce, "abc");
        assert_eq!(payload.external_id, "42");
        assert_eq!(payload.email, "vol@example.org");
        assert_eq!(payload.name.as_deref(), Some("Kai V"));
        assert!(!payload.admin);
        assert_eq!(payload.groups, vec!["helpline", "writers"]);
    }

    #[test]
    fn payload_missing_external_id_is_rejected() {
        assert!(SsoPayload::from_query("nonce=abc&email=a%40b.c").is_none());
    }

    #[test]
    fn group_membership_and_admin_both_authorize() {
        let mut payload =
            SsoPayload::from_query("nonce=n&external_id=1&email=a%40b.c&groups=helpline").unwrap();
        assert!(payload.is_allowed("helpline"));
        assert!(!payload.is_allowed("other"));

        payload.admin = true;
        assert!(payload.is_allowed("other"));
    }
}
