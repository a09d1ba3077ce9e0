//! Message DTOs - wire shapes for message resources
//!
//! Summary and detail differ only in how much of each attachment they carry:
//! summaries embed [`AttachmentLightDTO`] (metadata only), details embed
//! [`AttachmentDetailDTO`] (payload included).

use crate::dtos::{AttachmentDetailDTO, AttachmentLightDTO, CreateAttachmentDTO};
use crate::entities::{Attachment, AttachmentMeta, Message};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Message as returned by inbox/outbox listings.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummaryDTO {
    pub id: Uuid,
    pub sender: Uuid,
    pub receiver: Uuid,
    pub title: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
    pub parent_message_id: Option<Uuid>,
    pub attachments: Vec<AttachmentLightDTO>,
}

impl MessageSummaryDTO {
    pub fn from_message(message: Message, attachments: Vec<AttachmentMeta>) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            receiver: message.receiver,
            title: message.title,
            content: message.content,
            sent_at: message.sent_at,
            is_read: message.is_read,
            parent_message_id: message.parent_message_id,
            attachments: attachments.into_iter().map(AttachmentLightDTO::from).collect(),
        }
    }
}

/// Message as returned by the detail endpoint, attachment payloads included.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetailDTO {
    pub id: Uuid,
    pub sender: Uuid,
    pub receiver: Uuid,
    pub title: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
    pub parent_message_id: Option<Uuid>,
    pub attachments: Vec<AttachmentDetailDTO>,
}

impl MessageDetailDTO {
    pub fn from_message(message: Message, attachments: Vec<Attachment>) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            receiver: message.receiver,
            title: message.title,
            content: message.content,
            sent_at: message.sent_at,
            is_read: message.is_read,
            parent_message_id: message.parent_message_id,
            attachments: attachments.into_iter().map(AttachmentDetailDTO::from).collect(),
        }
    }
}

/// DTO for sending a new message (id, sent_at and is_read are assigned by
/// the storage layer).
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageDTO {
    pub sender: Uuid,
    pub receiver: Uuid,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be between 1 and 10000 characters"))]
    pub content: String,

    #[serde(default)]
    pub parent_message_id: Option<Uuid>,

    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<CreateAttachmentDTO>,
}

/// DTO for updating a message (is_read is the only mutable field).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageDTO {
    pub is_read: bool,
}
