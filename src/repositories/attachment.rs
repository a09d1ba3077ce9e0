//! AttachmentRepository - database operations for attachments

use super::Read;
use crate::dtos::CreateAttachmentDTO;
use crate::entities::{Attachment, AttachmentMeta};
use chrono::Utc;
use sqlx::{Error, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

const ATTACHMENT_COLUMNS: &str =
    "id, message_id, file_name, content_type, size, data, created_at";
const ATTACHMENT_META_COLUMNS: &str =
    "id, message_id, file_name, content_type, size, created_at";

// ATTACHMENT REPO
pub struct AttachmentRepository {
    connection_pool: SqlitePool,
}

impl AttachmentRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Insert one attachment row inside an already-open transaction.
    ///
    /// Shared between [`Self::create`] and the message repository, which
    /// persists a message and its initial attachments as one unit. The id
    /// is a fresh v4 UUID, `size` is derived from the payload and
    /// `created_at` is the current time.
    pub(crate) async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        message_id: Uuid,
        data: &CreateAttachmentDTO,
    ) -> Result<Attachment, Error> {
        let attachment = Attachment {
            id: Uuid::new_v4(),
            message_id,
            file_name: data.file_name.clone(),
            content_type: data.content_type.clone(),
            size: data.data.len() as i64,
            data: data.data.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO attachments (id, message_id, file_name, content_type, size, data, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(attachment.id)
        .bind(attachment.message_id)
        .bind(&attachment.file_name)
        .bind(&attachment.content_type)
        .bind(attachment.size)
        .bind(&attachment.data)
        .bind(attachment.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(attachment)
    }

    /// Add an attachment to an existing message.
    ///
    /// The existence check and the insert share one transaction so a failed
    /// addition never leaves an orphan row. `Ok(None)` means the message
    /// does not exist.
    pub async fn create(
        &self,
        message_id: &Uuid,
        data: &CreateAttachmentDTO,
    ) -> Result<Option<Attachment>, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let message_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE id = ?")
                .bind(message_id)
                .fetch_one(&mut *tx)
                .await?;
        if message_exists == 0 {
            return Ok(None);
        }

        let attachment = Self::insert(&mut tx, *message_id, data).await?;

        tx.commit().await?;
        Ok(Some(attachment))
    }

    /// Get the metadata of all attachments of a message, oldest first.
    /// Payloads stay in the database; this feeds the listing endpoints.
    pub async fn find_meta_by_message_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Vec<AttachmentMeta>, Error> {
        sqlx::query_as::<_, AttachmentMeta>(&format!(
            "SELECT {ATTACHMENT_META_COLUMNS} FROM attachments WHERE message_id = ? ORDER BY created_at ASC"
        ))
        .bind(message_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Get all attachments of a message with payloads, oldest first
    pub async fn find_many_by_message_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Vec<Attachment>, Error> {
        sqlx::query_as::<_, Attachment>(&format!(
            "SELECT {ATTACHMENT_COLUMNS} FROM attachments WHERE message_id = ? ORDER BY created_at ASC"
        ))
        .bind(message_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Read<Attachment, Uuid> for AttachmentRepository {
    async fn read(&self, id: &Uuid) -> Result<Option<Attachment>, Error> {
        sqlx::query_as::<_, Attachment>(&format!(
            "SELECT {ATTACHMENT_COLUMNS} FROM attachments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
