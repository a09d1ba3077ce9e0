//! Attachment entities - binary files bound to exactly one message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full attachment row, payload included. Only fetched one at a time.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Attachment {
    pub id: Uuid,
    pub message_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    /// Byte length of `data`; the repository derives it, never the caller.
    pub size: i64,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// Attachment row without the payload, used when listing messages so the
/// inbox/outbox never drags blobs out of the database.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct AttachmentMeta {
    pub id: Uuid,
    pub message_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}
