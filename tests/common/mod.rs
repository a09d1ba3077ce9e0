use axum_test::TestServer;
use messages_api::core::AppState;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

/// Builds a TestServer over the real router and a fresh database pool
pub fn create_test_server(pool: SqlitePool) -> TestServer {
    let state = Arc::new(AppState::new(pool));
    let app = messages_api::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Request body for a plain message without attachments
pub fn message_body(sender: Uuid, receiver: Uuid) -> Value {
    json!({
        "sender": sender,
        "receiver": receiver,
        "title": "Hi",
        "content": "Hello",
    })
}

/// Sends a message through the API and returns the created detail JSON
#[allow(dead_code)]
pub async fn send_test_message(server: &TestServer, body: &Value) -> Value {
    let response = server.post("/messages").json(body).await;
    response.assert_status(axum_test::http::StatusCode::CREATED);
    response.json()
}
