//! Letter storage seam.
//!
//! The durable store is an out-of-scope collaborator; this trait is
//! what the core needs from it. Every method reads or writes a single
//! record keyed by a natural identifier, so the store itself arbitrates
//! per-key ordering and no caller holds a lock across the call.

use crate::error::{LetterError, LetterResult};
use crate::records::{LetterId, LetterRecord, ReadReceipt, ReplyId, ReplyRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keyed storage for letters and their replies.
#[async_trait]
pub trait LetterStore: Send + Sync {
    async fn insert_letter(&self, letter: LetterRecord) -> LetterResult<()>;

    async fn find_by_access_key_hash(
        &self,
        access_key_hash: &str,
    ) -> LetterResult<Option<LetterRecord>>;

    async fn fetch_letter(&self, id: LetterId) -> LetterResult<Option<LetterRecord>>;

    /// Replaces an existing letter. Fails with [`LetterError::NotFound`]
    /// when the record does not exist.
    async fn update_letter(&self, letter: LetterRecord) -> LetterResult<()>;

    async fn insert_reply(&self, reply: ReplyRecord) -> LetterResult<()>;

    async fn reply_for_letter(&self, letter_id: LetterId) -> LetterResult<Option<ReplyRecord>>;

    async fn fetch_reply(&self, id: ReplyId) -> LetterResult<Option<ReplyRecord>>;

    /// Replaces an existing reply. Fails with [`LetterError::NotFound`]
    /// when the record does not exist.
    async fn update_reply(&self, reply: ReplyRecord) -> LetterResult<()>;

    /// Store-arbitrated receipt flip: records the reply as read at `at`
    /// only if it is still unread. A no-op otherwise, which makes the
    /// transition happen at most once under concurrent reads.
    async fn mark_reply_read(&self, id: ReplyId, at: DateTime<Utc>) -> LetterResult<()>;
}

#[derive(Default)]
struct MemoryLetterState {
    letters: HashMap<LetterId, LetterRecord>,
    by_key_hash: HashMap<String, LetterId>,
    replies: HashMap<ReplyId, ReplyRecord>,
    reply_by_letter: HashMap<LetterId, ReplyId>,
}

/// In-memory letter store for tests and small deployments.
#[derive(Default)]
pub struct MemoryLetterStore {
    state: RwLock<MemoryLetterState>,
}

impl MemoryLetterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LetterStore for MemoryLetterStore {
    async fn insert_letter(&self, letter: LetterRecord) -> LetterResult<()> {
        let mut state = self.state.write().await;
        state
            .by_key_hash
            .insert(letter.access_key_hash.clone(), letter.id);
        state.letters.insert(letter.id, letter);
        Ok(())
    }

    async fn find_by_access_key_hash(
        &self,
        access_key_hash: &str,
    ) -> LetterResult<Option<LetterRecord>> {
        let state = self.state.read().await;
        Ok(state
            .by_key_hash
            .get(access_key_hash)
            .and_then(|id| state.letters.get(id))
            .cloned())
    }

    async fn fetch_letter(&self, id: LetterId) -> LetterResult<Option<LetterRecord>> {
        let state = self.state.read().await;
        Ok(state.letters.get(&id).cloned())
    }

    async fn update_letter(&self, letter: LetterRecord) -> LetterResult<()> {
        let mut state = self.state.write().await;
        if !state.letters.contains_key(&letter.id) {
            return Err(LetterError::NotFound);
        }
        state.letters.insert(letter.id, letter);
        Ok(())
    }

    async fn insert_reply(&self, reply: ReplyRecord) -> LetterResult<()> {
        let mut state = self.state.write().await;
        state.reply_by_letter.insert(reply.letter_id, reply.id);
        state.replies.insert(reply.id, reply);
        Ok(())
    }

    async fn reply_for_letter(&self, letter_id: LetterId) -> LetterResult<Option<ReplyRecord>> {
        let state = self.state.read().await;
        Ok(state
            .reply_by_letter
            .get(&letter_id)
            .and_then(|id| state.replies.get(id))
            .cloned())
    }

    async fn fetch_reply(&self, id: ReplyId) -> LetterResult<Option<ReplyRecord>> {
        let state = self.state.read().await;
        Ok(state.replies.get(&id).cloned())
    }

    async fn update_reply(&self, reply: ReplyRecord) -> LetterResult<()> {
        let mut state = self.state.write().await;
        if !state.replies.contains_key(&reply.id) {
            return Err(LetterError::NotFound);
        }
        state.replies.insert(reply.id, reply);
        Ok(())
    }

    async fn mark_reply_read(&self, id: ReplyId, at: DateTime<Utc>) -> LetterResult<()> {
        let mut state = self.state.write().await;
        let reply = state.replies.get_mut(&id).ok_or(LetterError::NotFound)?;
        if reply.receipt == ReadReceipt::Unread {
            reply.receipt = ReadReceipt::Read;
            reply.read_at = Some(at);
        }
        Ok(())
    }
}
