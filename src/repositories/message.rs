//! MessageRepository - database operations for messages

use super::{AttachmentRepository, Read, Update};
use crate::dtos::{CreateMessageDTO, UpdateMessageDTO};
use crate::entities::Message;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use uuid::Uuid;

const MESSAGE_COLUMNS: &str =
    "id, sender, receiver, title, content, sent_at, is_read, parent_message_id";

/// Outcome of [`MessageRepository::delete`]. The restrict-on-delete rule for
/// threaded messages needs more than a unit result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDeleteOutcome {
    /// Message and its attachments were removed
    Deleted,
    /// No message with that id
    NotFound,
    /// At least one other message references this one as its parent
    HasReplies,
}

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Persist a new message together with its initial attachments as one
    /// transaction: either everything lands or nothing does.
    ///
    /// The id is a fresh v4 UUID, `sent_at` is the current time and
    /// `is_read` starts false. When `parent_message_id` is set it must
    /// resolve to an existing message; the check runs inside the same
    /// transaction as the insert and `Ok(None)` is returned when it fails.
    pub async fn create(&self, data: &CreateMessageDTO) -> Result<Option<Message>, Error> {
        let mut tx = self.connection_pool.begin().await?;

        if let Some(parent_id) = data.parent_message_id {
            let parent_exists = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM messages WHERE id = ?",
            )
            .bind(parent_id)
            .fetch_one(&mut *tx)
            .await?;

            if parent_exists == 0 {
                return Ok(None);
            }
        }

        let message = Message {
            id: Uuid::new_v4(),
            sender: data.sender,
            receiver: data.receiver,
            title: data.title.clone(),
            content: data.content.clone(),
            sent_at: Utc::now(),
            is_read: false,
            parent_message_id: data.parent_message_id,
        };

        sqlx::query(
            r#"
            INSERT INTO messages (id, sender, receiver, title, content, sent_at, is_read, parent_message_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(message.id)
        .bind(message.sender)
        .bind(message.receiver)
        .bind(&message.title)
        .bind(&message.content)
        .bind(message.sent_at)
        .bind(message.is_read)
        .bind(message.parent_message_id)
        .execute(&mut *tx)
        .await?;

        for attachment in &data.attachments {
            AttachmentRepository::insert(&mut tx, message.id, attachment).await?;
        }

        tx.commit().await?;
        Ok(Some(message))
    }

    /// Get all messages sent by `sender` (outbox), newest first
    pub async fn find_many_by_sender(&self, sender: &Uuid) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE sender = ? ORDER BY sent_at DESC"
        ))
        .bind(sender)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Get all messages addressed to `receiver` (inbox), newest first
    pub async fn find_many_by_receiver(&self, receiver: &Uuid) -> Result<Vec<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE receiver = ? ORDER BY sent_at DESC"
        ))
        .bind(receiver)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Remove a message and its attachments.
    ///
    /// Refuses with [`MessageDeleteOutcome::HasReplies`] while other
    /// messages still reference `id` through `parent_message_id`.
    /// Attachments are removed in the same transaction (cascade).
    pub async fn delete(&self, id: &Uuid) -> Result<MessageDeleteOutcome, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if exists == 0 {
            return Ok(MessageDeleteOutcome::NotFound);
        }

        let replies = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE parent_message_id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if replies > 0 {
            return Ok(MessageDeleteOutcome::HasReplies);
        }

        sqlx::query("DELETE FROM attachments WHERE message_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(MessageDeleteOutcome::Deleted)
    }
}

impl Read<Message, Uuid> for MessageRepository {
    async fn read(&self, id: &Uuid) -> Result<Option<Message>, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<Message, UpdateMessageDTO, Uuid> for MessageRepository {
    /// Flip the read flag, the only mutable field of a message
    async fn update(&self, id: &Uuid, data: &UpdateMessageDTO) -> Result<Message, Error> {
        sqlx::query_as::<_, Message>(&format!(
            "UPDATE messages SET is_read = ? WHERE id = ? RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(data.is_read)
        .bind(id)
        .fetch_one(&self.connection_pool)
        .await
    }
}
