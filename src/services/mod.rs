//! Services module - coordinator for all HTTP service handlers
//!
//! One module per resource; each handler translates between the wire shapes
//! in [`crate::dtos`] and the storage layer in [`crate::repositories`].

pub mod attachment;
pub mod message;

// Re-exports to simplify imports
pub use attachment::{add_attachment, get_attachment_detail};
pub use message::{
    delete_message, get_inbox, get_message_detail, get_outbox, mark_read, send_message,
};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
