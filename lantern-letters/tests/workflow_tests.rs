//! Reply workflow tests: forward-only transitions, explicit unpublish,
//! and handler reassignment.

use lantern_crypto::{ContentCipher, ContentKey};
use lantern_letters::{
    LetterAccess, LetterError, LetterId, LetterStore, LettersConfig, MemoryLetterStore,
    ReplyAuthor, ReplyStatus, ReplyWorkflow,
};
use std::sync::Arc;

struct Fixture {
    access: LetterAccess,
    workflow: ReplyWorkflow,
    store: Arc<MemoryLetterStore>,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryLetterStore::new());
    let cipher = Arc::new(ContentCipher::new(&ContentKey::from_bytes([9u8; 32])));
    let config = LettersConfig {
        lookup_salt: "deployment-wide-lookup-salt".into(),
    };
    Fixture {
        access: LetterAccess::new(store.clone(), cipher.clone(), config),
        workflow: ReplyWorkflow::new(store.clone(), cipher),
        store,
    }
}

async fn started_letter(fx: &Fixture) -> LetterId {
    fx.access.start().await.unwrap().id
}

// ── Forward transitions ──

#[tokio::test]
async fn draft_review_publish_happy_path() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;

    let reply_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "A careful answer")
        .await
        .unwrap();

    let draft = fx.store.fetch_reply(reply_id).await.unwrap().unwrap();
    assert_eq!(draft.status, ReplyStatus::Draft);

    fx.workflow.submit_for_review(reply_id).await.unwrap();
    let in_review = fx.store.fetch_reply(reply_id).await.unwrap().unwrap();
    assert_eq!(in_review.status, ReplyStatus::InReview);
    assert!(in_review.status_changed_at >= draft.status_changed_at);

    fx.workflow.publish(reply_id).await.unwrap();
    let published = fx.store.fetch_reply(reply_id).await.unwrap().unwrap();
    assert_eq!(published.status, ReplyStatus::Published);
}

#[tokio::test]
async fn publish_straight_from_draft_is_rejected() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;
    let reply_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "text")
        .await
        .unwrap();

    let err = fx.workflow.publish(reply_id).await.unwrap_err();
    assert!(matches!(
        err,
        LetterError::InvalidTransition {
            from: ReplyStatus::Draft,
            to: ReplyStatus::Published,
        }
    ));
}

#[tokio::test]
async fn review_cannot_be_entered_twice() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;
    let reply_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "text")
        .await
        .unwrap();
    fx.workflow.submit_for_review(reply_id).await.unwrap();

    let err = fx.workflow.submit_for_review(reply_id).await.unwrap_err();
    assert!(matches!(err, LetterError::InvalidTransition { .. }));
}

// ── Unpublish ──

#[tokio::test]
async fn unpublish_returns_to_draft_and_allows_rework() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;
    let reply_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "v1")
        .await
        .unwrap();
    fx.workflow.submit_for_review(reply_id).await.unwrap();
    fx.workflow.publish(reply_id).await.unwrap();

    fx.workflow.unpublish(reply_id).await.unwrap();
    let reply = fx.store.fetch_reply(reply_id).await.unwrap().unwrap();
    assert_eq!(reply.status, ReplyStatus::Draft);

    // The draft can now be rewritten and re-reviewed.
    let same_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "v2")
        .await
        .unwrap();
    assert_eq!(same_id, reply_id);
    fx.workflow.submit_for_review(reply_id).await.unwrap();
}

#[tokio::test]
async fn unpublish_requires_published_status() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;
    let reply_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "text")
        .await
        .unwrap();

    let err = fx.workflow.unpublish(reply_id).await.unwrap_err();
    assert!(matches!(err, LetterError::InvalidTransition { .. }));
}

// ── Draft editing ──

#[tokio::test]
async fn draft_can_be_overwritten_while_in_draft() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;

    let first = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "first wording")
        .await
        .unwrap();
    let second = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "better wording")
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn draft_cannot_be_edited_once_in_review() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;
    let reply_id = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "text")
        .await
        .unwrap();
    fx.workflow.submit_for_review(reply_id).await.unwrap();

    let err = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "too late")
        .await
        .unwrap_err();
    assert!(matches!(err, LetterError::InvalidTransition { .. }));
}

#[tokio::test]
async fn empty_draft_text_is_rejected() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;

    let err = fx
        .workflow
        .save_draft(letter_id, ReplyAuthor::Internal, "")
        .await
        .unwrap_err();
    assert!(matches!(err, LetterError::EmptyReply));
}

#[tokio::test]
async fn draft_for_unknown_letter_is_not_found() {
    let fx = fixture();
    let err = fx
        .workflow
        .save_draft(LetterId::new(), ReplyAuthor::Internal, "text")
        .await
        .unwrap_err();
    assert!(matches!(err, LetterError::NotFound));
}

// ── Reassignment ──

#[tokio::test]
async fn reassign_sets_and_clears_the_handler() {
    let fx = fixture();
    let letter_id = started_letter(&fx).await;
    let handler = uuid::Uuid::new_v4();

    fx.workflow
        .reassign_letter(letter_id, Some(handler))
        .await
        .unwrap();
    let letter = fx.store.fetch_letter(letter_id).await.unwrap().unwrap();
    assert_eq!(letter.assigned_to, Some(handler));

    fx.workflow.reassign_letter(letter_id, None).await.unwrap();
    let letter = fx.store.fetch_letter(letter_id).await.unwrap().unwrap();
    assert_eq!(letter.assigned_to, None);
}

#[tokio::test]
async fn reassign_unknown_letter_is_not_found() {
    let fx = fixture();
    let err = fx
        .workflow
        .reassign_letter(LetterId::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, LetterError::NotFound));
}
