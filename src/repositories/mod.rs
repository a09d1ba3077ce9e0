//! Repositories module - coordinator for all project repositories
//!
//! Each repository owns the database operations for one entity. Queries use
//! the runtime-checked sqlx API (`query_as::<_, T>` over `FromRow` entities)
//! so the crate builds and its tests run against a fresh SQLite database
//! without a prepared query cache.
//!
//! Referential rules live here rather than in SQLite pragmas: the thread
//! link (`parent_message_id`) is resolved inside the insert transaction, and
//! deletes scan for replies before removing anything.

pub mod attachment;
pub mod message;
pub mod traits;

// Re-export the traits to simplify imports
pub use traits::{Read, Update};

// Re-export the repository structs to simplify imports
pub use attachment::AttachmentRepository;
pub use message::{MessageDeleteOutcome, MessageRepository};
