//! Staff-side reply workflow.
//!
//! Replies move draft → in_review → published, with an explicit
//! unpublish back to draft as the only backwards step. Read receipts
//! are never touched from this side; they belong to the anonymous
//! read path alone.

use crate::error::{LetterError, LetterResult};
use crate::records::{
    LetterId, ReadReceipt, ReplyAuthor, ReplyId, ReplyRecord, ReplyStatus,
};
use crate::store::LetterStore;
use chrono::Utc;
use lantern_crypto::ContentCipher;
use std::sync::Arc;
use tracing::debug;

/// Reply authoring and lifecycle management for internal handlers.
pub struct ReplyWorkflow {
    store: Arc<dyn LetterStore>,
    cipher: Arc<ContentCipher>,
}

impl ReplyWorkflow {
    pub fn new(store: Arc<dyn LetterStore>, cipher: Arc<ContentCipher>) -> Self {
        Self { store, cipher }
    }

    /// Creates or overwrites the draft reply for a letter.
    ///
    /// A reply that has left draft must be unpublished (or sent back
    /// from review) before its text can change.
    pub async fn save_draft(
        &self,
        letter_id: LetterId,
        author: ReplyAuthor,
        text: &str,
    ) -> LetterResult<ReplyId> {
        if self.store.fetch_letter(letter_id).await?.is_none() {
            return Err(LetterError::NotFound);
        }

        let sealed = self.cipher.encrypt(text)?.ok_or(LetterError::EmptyReply)?;

        match self.store.reply_for_letter(letter_id).await? {
            Some(mut reply) => {
                if reply.status != ReplyStatus::Draft {
                    return Err(LetterError::InvalidTransition {
                        from: reply.status,
                        to: ReplyStatus::Draft,
                    });
                }
                reply.content = sealed;
                reply.author = author;
                let id = reply.id;
                self.store.update_reply(reply).await?;
                Ok(id)
            }
            None => {
                let reply = ReplyRecord {
                    id: ReplyId::new(),
                    letter_id,
                    content: sealed,
                    author,
                    status: ReplyStatus::Draft,
                    receipt: ReadReceipt::Unread,
                    read_at: None,
                    status_changed_at: Utc::now(),
                };
                let id = reply.id;
                self.store.insert_reply(reply).await?;
                debug!(letter = %letter_id, reply = %id, "reply draft created");
                Ok(id)
            }
        }
    }

    /// draft → in_review.
    pub async fn submit_for_review(&self, id: ReplyId) -> LetterResult<()> {
        self.transition(id, ReplyStatus::Draft, ReplyStatus::InReview)
            .await
    }

    /// in_review → published. The reply becomes visible to the
    /// anonymous read path.
    pub async fn publish(&self, id: ReplyId) -> LetterResult<()> {
        self.transition(id, ReplyStatus::InReview, ReplyStatus::Published)
            .await
    }

    /// published → draft. The only backwards transition, and it is
    /// explicit.
    pub async fn unpublish(&self, id: ReplyId) -> LetterResult<()> {
        self.transition(id, ReplyStatus::Published, ReplyStatus::Draft)
            .await
    }

    /// Reassigns the internal handler of a letter. The record is
    /// otherwise read-only after send.
    pub async fn reassign_letter(
        &self,
        letter_id: LetterId,
        handler: Option<uuid::Uuid>,
    ) -> LetterResult<()> {
        let mut letter = self
            .store
            .fetch_letter(letter_id)
            .await?
            .ok_or(LetterError::NotFound)?;
        letter.assigned_to = handler;
        self.store.update_letter(letter).await?;
        debug!(letter = %letter_id, "letter reassigned");
        Ok(())
    }

    async fn transition(
        &self,
        id: ReplyId,
        from: ReplyStatus,
        to: ReplyStatus,
    ) -> LetterResult<()> {
        let mut reply = self
            .store
            .fetch_reply(id)
            .await?
            .ok_or(LetterError::NotFound)?;

        if reply.status != from {
            return Err(LetterError::InvalidTransition {
                from: reply.status,
                to,
            });
        }

        reply.status = to;
        reply.status_changed_at = Utc::now();
        self.store.update_reply(reply).await?;
        debug!(reply = %id, %from, %to, "reply transitioned");
        Ok(())
    }
}
