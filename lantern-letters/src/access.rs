//! Anonymous letter access.
//!
//! A correspondent holds only the access-key/access-password pair
//! issued at start; there is no account and no session. Both secrets
//! are validated on every operation, and either failure reports the
//! same mismatch so responses cannot distinguish "no such key" from
//! "wrong password".

use crate::config::LettersConfig;
use crate::error::{LetterError, LetterResult};
use crate::records::{LetterId, LetterRecord, LetterStatus, ReadReceipt, ReplyStatus};
use crate::store::LetterStore;
use chrono::{DateTime, Utc};
use lantern_crypto::{hash_secret, hash_with_salt, issue_credentials, verify_secret};
use lantern_crypto::{AccessCredentials, ContentCipher};
use std::sync::Arc;
use tracing::debug;

/// Result of starting a letter: the plaintext credential pair, handed
/// out exactly once, plus the record id for staff-side handling.
#[derive(Debug, Clone)]
pub struct StartedLetter {
    pub id: LetterId,
    pub credentials: AccessCredentials,
}

/// A correspondent's submission.
#[derive(Debug, Clone)]
pub struct LetterSubmission {
    pub access_key: String,
    pub access_password: String,
    pub title: String,
    pub content: String,
}

/// Decrypted view returned by `read`.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterView {
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: DateTime<Utc>,
    /// Decrypted published reply, if one exists. Draft and in-review
    /// replies are never exposed here.
    pub reply: Option<String>,
}

/// Credential-gated create/update/read of anonymous correspondence.
pub struct LetterAccess {
    store: Arc<dyn LetterStore>,
    cipher: Arc<ContentCipher>,
    config: LettersConfig,
}

impl LetterAccess {
    pub fn new(
        store: Arc<dyn LetterStore>,
        cipher: Arc<ContentCipher>,
        config: LettersConfig,
    ) -> Self {
        Self {
            store,
            cipher,
            config,
        }
    }

    /// Mints a credential pair and persists an empty draft record.
    ///
    /// Only hashes are stored. Callers that abandon the pair simply
    /// leave a disposable empty record behind; retrying `start` after
    /// a network failure mints a new one.
    pub async fn start(&self) -> LetterResult<StartedLetter> {
        let credentials = issue_credentials();
        let access_key_hash = hash_with_salt(&credentials.access_key, &self.config.lookup_salt);
        let password = hash_secret(&credentials.access_password);

        let letter = LetterRecord {
            id: LetterId::new(),
            access_key_hash,
            access_password_hash: password.hash,
            access_password_salt: password.salt,
            title: None,
            content: None,
            status: LetterStatus::Draft,
            created: Utc::now(),
            assigned_to: None,
        };
        let id = letter.id;
        self.store.insert_letter(letter).await?;

        debug!(letter = %id, "anonymous letter started");
        Ok(StartedLetter { id, credentials })
    }

    /// Encrypts and stores the submission, transitioning the letter to
    /// sent. Sending again overwrites content: it is the
    /// correspondent's own resubmission, not a new record.
    pub async fn send(&self, submission: &LetterSubmission) -> LetterResult<()> {
        let mut letter = self
            .authenticate(&submission.access_key, &submission.access_password)
            .await?;

        // Title and content are sealed independently, each under its
        // own fresh nonce.
        letter.title = self.cipher.encrypt(&submission.title)?;
        letter.content = self.cipher.encrypt(&submission.content)?;
        letter.status = LetterStatus::Sent;

        let id = letter.id;
        self.store.update_letter(letter).await?;
        debug!(letter = %id, "anonymous letter sent");
        Ok(())
    }

    /// Decrypts and returns the letter, plus any published reply.
    ///
    /// Fetching a published, still-unread reply flips its receipt to
    /// read and stamps the time; this call is the sole trigger for
    /// that transition, and it happens at most once.
    pub async fn read(&self, access_key: &str, access_password: &str) -> LetterResult<LetterView> {
        let letter = self.authenticate(access_key, access_password).await?;

        let title = letter
            .title
            .as_ref()
            .map(|sealed| self.cipher.decrypt(sealed))
            .transpose()?;
        let content = letter
            .content
            .as_ref()
            .map(|sealed| self.cipher.decrypt(sealed))
            .transpose()?;

        let reply = match self.store.reply_for_letter(letter.id).await? {
            Some(reply) if reply.status == ReplyStatus::Published => {
                let text = self.cipher.decrypt(&reply.content)?;
                if reply.receipt == ReadReceipt::Unread {
                    self.store.mark_reply_read(reply.id, Utc::now()).await?;
                }
                Some(text)
            }
            _ => None,
        };

        Ok(LetterView {
            title,
            content,
            created: letter.created,
            reply,
        })
    }

    /// Validates the credential pair against stored hashes.
    ///
    /// Lookup failure and password mismatch are indistinguishable in
    /// the returned error.
    async fn authenticate(
        &self,
        access_key: &str,
        access_password: &str,
    ) -> LetterResult<LetterRecord> {
        let access_key_hash = hash_with_salt(access_key, &self.config.lookup_salt);
        let Some(letter) = self.store.find_by_access_key_hash(&access_key_hash).await? else {
            return Err(LetterError::CredentialMismatch);
        };

        if !verify_secret(
            access_password,
            &letter.access_password_salt,
            &letter.access_password_hash,
        ) {
            return Err(LetterError::CredentialMismatch);
        }

        Ok(letter)
    }
}
