//! Message services - inbox/outbox listings, detail, read flag, delete

use crate::core::{AppError, AppState};
use crate::dtos::{CreateMessageDTO, MessageDetailDTO, MessageSummaryDTO, UpdateMessageDTO};
use crate::entities::Message;
use crate::repositories::{MessageDeleteOutcome, Read, Update};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Builds listing summaries: for each message the attachment metadata is
/// fetched with parallel primary-key lookups, payloads never leave the
/// database.
async fn collect_summaries(
    state: &Arc<AppState>,
    messages: Vec<Message>,
) -> Result<Vec<MessageSummaryDTO>, AppError> {
    let summaries = try_join_all(messages.into_iter().map(|message| {
        let state = state.clone();
        async move {
            let attachments = state.attachment.find_meta_by_message_id(&message.id).await?;
            Ok::<_, sqlx::Error>(MessageSummaryDTO::from_message(message, attachments))
        }
    }))
    .await?;

    Ok(summaries)
}

#[instrument(skip(state), fields(sender = %sender))]
pub async fn get_outbox(
    State(state): State<Arc<AppState>>,
    Path(sender): Path<Uuid>,
) -> Result<Json<Vec<MessageSummaryDTO>>, AppError> {
    debug!("Listing outbox");

    let messages = state.msg.find_many_by_sender(&sender).await?;
    let summaries = collect_summaries(&state, messages).await?;

    info!("Retrieved {} outbox messages", summaries.len());
    Ok(Json(summaries))
}

#[instrument(skip(state), fields(receiver = %receiver))]
pub async fn get_inbox(
    State(state): State<Arc<AppState>>,
    Path(receiver): Path<Uuid>,
) -> Result<Json<Vec<MessageSummaryDTO>>, AppError> {
    debug!("Listing inbox");

    let messages = state.msg.find_many_by_receiver(&receiver).await?;
    let summaries = collect_summaries(&state, messages).await?;

    info!("Retrieved {} inbox messages", summaries.len());
    Ok(Json(summaries))
}

#[instrument(skip(state), fields(message_id = %message_id))]
pub async fn get_message_detail(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<Json<MessageDetailDTO>, AppError> {
    debug!("Fetching message detail");

    let message = state
        .msg
        .read(&message_id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    let attachments = state.attachment.find_many_by_message_id(&message.id).await?;

    Ok(Json(MessageDetailDTO::from_message(message, attachments)))
}

#[instrument(skip(state, body), fields(sender = %body.sender, receiver = %body.receiver))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateMessageDTO>,
) -> Result<(StatusCode, Json<MessageDetailDTO>), AppError> {
    debug!("Creating new message");

    body.validate()?;

    let message = state.msg.create(&body).await?.ok_or_else(|| {
        warn!("Message creation attempted with unknown parent message");
        AppError::not_found("Parent message not found")
    })?;

    let attachments = state.attachment.find_many_by_message_id(&message.id).await?;

    info!(
        "Message {} created with {} attachments",
        message.id,
        attachments.len()
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageDetailDTO::from_message(message, attachments)),
    ))
}

#[instrument(skip(state), fields(message_id = %message_id, is_read = is_read))]
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path((message_id, is_read)): Path<(Uuid, bool)>,
) -> Result<StatusCode, AppError> {
    debug!("Updating read status");

    // RowNotFound is mapped to 404 by the AppError conversion
    state
        .msg
        .update(&message_id, &UpdateMessageDTO { is_read })
        .await?;

    info!("Read status updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), fields(message_id = %message_id))]
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    debug!("Deleting message");

    match state.msg.delete(&message_id).await? {
        MessageDeleteOutcome::Deleted => {
            info!("Message deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        MessageDeleteOutcome::NotFound => Err(AppError::not_found("Message not found")),
        MessageDeleteOutcome::HasReplies => {
            warn!("Delete refused, message still has replies");
            Err(AppError::conflict(
                "Message is referenced by other messages",
            ))
        }
    }
}
