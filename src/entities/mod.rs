//! Entities module - persisted domain records
//!
//! Each entity corresponds to a table in the database (or, for
//! [`AttachmentMeta`], a projection of one).

pub mod attachment;
pub mod message;

// Re-exports to simplify imports
pub use attachment::{Attachment, AttachmentMeta};
pub use message::Message;
