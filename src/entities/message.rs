//! Message entity - one unit of correspondence between two parties

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender: Uuid,
    pub receiver: Uuid,
    pub title: String,
    pub content: String,
    // stored as an ISO 8601 string, parsed by sqlx through the chrono feature
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
    // thread link: resolves to another message row, checked at write time
    pub parent_message_id: Option<Uuid>,
}
