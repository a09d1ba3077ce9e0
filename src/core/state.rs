//! Application state shared between all routes

use crate::repositories::{AttachmentRepository, MessageRepository};
use sqlx::SqlitePool;

/// Global application state, one repository per entity
pub struct AppState {
    /// Repository for message rows
    pub msg: MessageRepository,

    /// Repository for attachment rows
    pub attachment: AttachmentRepository,
}

impl AppState {
    /// Builds the state from a shared SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            msg: MessageRepository::new(pool.clone()),
            attachment: AttachmentRepository::new(pool),
        }
    }
}
