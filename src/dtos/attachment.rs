//! Attachment DTOs - wire shapes for attachment resources

use crate::entities::{Attachment, AttachmentMeta};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lightweight attachment representation used inside message listings.
/// Deliberately has no `data` field so inbox/outbox responses stay small.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentLightDTO {
    pub id: Uuid,
    pub message_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

impl From<AttachmentMeta> for AttachmentLightDTO {
    fn from(value: AttachmentMeta) -> Self {
        Self {
            id: value.id,
            message_id: value.message_id,
            file_name: value.file_name,
            content_type: value.content_type,
            size: value.size,
            created_at: value.created_at,
        }
    }
}

/// Full attachment representation, payload included.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDetailDTO {
    pub id: Uuid,
    pub message_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl From<Attachment> for AttachmentDetailDTO {
    fn from(value: Attachment) -> Self {
        Self {
            id: value.id,
            message_id: value.message_id,
            file_name: value.file_name,
            content_type: value.content_type,
            size: value.size,
            data: value.data,
            created_at: value.created_at,
        }
    }
}

/// DTO for creating an attachment (the owning message id comes from the
/// path, the size is derived from `data` by the repository).
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttachmentDTO {
    #[validate(length(min = 1, max = 255, message = "File name must be between 1 and 255 characters"))]
    pub file_name: String,

    #[validate(length(min = 1, max = 255, message = "Content type must be between 1 and 255 characters"))]
    pub content_type: String,

    #[serde(default)]
    pub data: Vec<u8>,
}
