//! Chat API endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use parley_database::Chat;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiError;
use crate::services::ChatService;
use crate::types::IncomingMessage;

#[derive(Clone)]
pub struct ChatApiState {
    pub service: Arc<ChatService>,
}

pub fn build_router(state: ChatApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/chats", post(create_chat))
        .route("/v1/chats/:id", get(get_chat).delete(delete_chat))
        .route("/v1/chats/messages", post(send_message))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub usernames: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateChatResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: i64,
    pub usernames: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            usernames: chat.usernames,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub from: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_chat(
    State(state): State<ChatApiState>,
    Json(payload): Json<CreateChatRequest>,
) -> Result<Json<CreateChatResponse>, ApiError> {
    let id = state.service.create(payload.usernames).await?;
    info!(id, "created chat");

    Ok(Json(CreateChatResponse { id }))
}

async fn get_chat(
    State(state): State<ChatApiState>,
    Path(id): Path<i64>,
) -> Result<Json<ChatResponse>, ApiError> {
    let chat = state.service.get(id).await?;
    Ok(Json(chat.into()))
}

async fn delete_chat(
    State(state): State<ChatApiState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.delete(id).await?;
    info!(id, "deleted chat");

    Ok(Json(serde_json::json!({})))
}

async fn send_message(
    State(state): State<ChatApiState>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let message = IncomingMessage {
        from: payload.from,
        text: payload.text,
        timestamp: payload.timestamp,
    };

    state.service.send_message(message).await?;

    Ok(Json(serde_json::json!({})))
}
