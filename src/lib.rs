//! Messages API library - exposes the main modules for the binary and tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export the main types to simplify imports
pub use self::core::{AppError, AppState};
pub use self::services::root;

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/messages", configure_message_routes())
        .nest("/attachments", configure_attachment_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes for sending, listing, reading and deleting messages
fn configure_message_routes() -> Router<Arc<AppState>> {
    use crate::services::*;

    Router::new()
        .route("/", post(send_message))
        .route("/outbox/{sender}", get(get_outbox))
        .route("/inbox/{receiver}", get(get_inbox))
        .route("/{message_id}", get(get_message_detail).delete(delete_message))
        .route("/{message_id}/{is_read}", patch(mark_read))
        .route("/{message_id}/attachment", post(add_attachment))
}

/// Routes for fetching attachments by id
fn configure_attachment_routes() -> Router<Arc<AppState>> {
    use crate::services::*;

    Router::new().route("/{attachment_id}", get(get_attachment_detail))
}
