//! Attachment services - add an attachment to a message, fetch one by id

use crate::core::{AppError, AppState};
use crate::dtos::{AttachmentDetailDTO, CreateAttachmentDTO};
use crate::repositories::Read;
use axum::{
    extract::{Json, Path, State},
    http::{StatusCode, header},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[instrument(skip(state, body), fields(message_id = %message_id, file_name = %body.file_name))]
pub async fn add_attachment(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
    Json(body): Json<CreateAttachmentDTO>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<AttachmentDetailDTO>), AppError> {
    debug!("Adding attachment");

    body.validate()?;

    let attachment = state
        .attachment
        .create(&message_id, &body)
        .await?
        .ok_or_else(|| {
            warn!("Attachment addition attempted on unknown message");
            AppError::not_found("Message not found")
        })?;

    info!("Attachment {} created ({} bytes)", attachment.id, attachment.size);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/attachments/{}", attachment.id))],
        Json(AttachmentDetailDTO::from(attachment)),
    ))
}

#[instrument(skip(state), fields(attachment_id = %attachment_id))]
pub async fn get_attachment_detail(
    State(state): State<Arc<AppState>>,
    Path(attachment_id): Path<Uuid>,
) -> Result<Json<AttachmentDetailDTO>, AppError> {
    debug!("Fetching attachment detail");

    let attachment = state
        .attachment
        .read(&attachment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Attachment not found"))?;

    Ok(Json(AttachmentDetailDTO::from(attachment)))
}
