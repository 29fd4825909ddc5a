//! Anonymous correspondence core for Lantern.
//!
//! Lets an unauthenticated correspondent create, update, and later
//! retrieve an encrypted letter using only two self-chosen secret
//! strings, with no account and no email. Credentials are validated through
//! salted hashes, content is sealed with the process-wide cipher, and
//! staff replies flow through a reviewed publish lifecycle before the
//! anonymous side can see them.

pub mod access;
pub mod config;
pub mod error;
pub mod records;
pub mod store;
pub mod workflow;

pub use access::{LetterAccess, LetterSubmission, LetterView, StartedLetter};
pub use config::LettersConfig;
pub use error::{LetterError, LetterResult};
pub use records::{
    LetterId, LetterRecord, LetterStatus, ReadReceipt, ReplyAuthor, ReplyId, ReplyRecord,
    ReplyStatus,
};
pub use store::{LetterStore, MemoryLetterStore};
pub use workflow::ReplyWorkflow;
