//! Letter and reply records.
//!
//! Only hashes and ciphertext are persisted: the access key and
//! password exist in plaintext solely in the correspondent's hands,
//! and letter text is sealed per field with its own nonce.

use chrono::{DateTime, Utc};
use lantern_crypto::SealedText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LetterId(pub uuid::Uuid);

impl LetterId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for LetterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyId(pub uuid::Uuid);

impl ReplyId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ReplyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReplyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Letter lifecycle: created empty at start, filled at send.
/// The draft → sent transition is irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterStatus {
    Draft,
    Sent,
}

/// Reply lifecycle. Status only moves forward except for an explicit
/// unpublish back to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Draft,
    InReview,
    Published,
}

impl fmt::Display for ReplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyStatus::Draft => write!(f, "draft"),
            ReplyStatus::InReview => write!(f, "in_review"),
            ReplyStatus::Published => write!(f, "published"),
        }
    }
}

/// Whether the external party has fetched a published reply.
/// Transitions unread → read at most once, only from the anonymous
/// read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadReceipt {
    Unread,
    Read,
}

/// Who authored a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAuthor {
    Internal,
    External,
}

/// A stored anonymous letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterRecord {
    pub id: LetterId,
    /// Keyed hash of the access key under the deployment-wide lookup
    /// salt; unique across all records.
    pub access_key_hash: String,
    /// Keyed hash of the access password under the per-record salt.
    pub access_password_hash: String,
    /// Salt generated for this record; the password hash is
    /// meaningless without it.
    pub access_password_salt: String,
    pub title: Option<SealedText>,
    pub content: Option<SealedText>,
    pub status: LetterStatus,
    pub created: DateTime<Utc>,
    /// Internal handler currently assigned to this letter.
    pub assigned_to: Option<uuid::Uuid>,
}

/// A staff reply attached 1:1 to a letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub id: ReplyId,
    pub letter_id: LetterId,
    pub content: SealedText,
    pub author: ReplyAuthor,
    pub status: ReplyStatus,
    pub receipt: ReadReceipt,
    pub read_at: Option<DateTime<Utc>>,
    pub status_changed_at: DateTime<Utc>,
}
